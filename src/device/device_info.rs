use std::fmt;

use super::addr_map::AddrMap;
use super::endpoint::Endpoint;
use super::prefix_list::PrefixList;
use super::prop_info::PropInfo;
use super::time_info::{TimeInfo, Timestamped};
use super::vnet_map::{VNetKind, VNetMap};

/// Everything known about one device, keyed by its MAC address
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    time: TimeInfo,
    pub mac: Endpoint,
    pub packets: u64,
    pub vlans: VNetMap,
    pub vxlans: VNetMap,
    pub geneves: VNetMap,
    pub powerline: PropInfo,
    pub bridge: PropInfo,
    pub dhcp: PropInfo,
    pub router: PropInfo,
    pub prefixes: PrefixList,
    pub ucasts: AddrMap,
    pub mcasts: AddrMap,
    pub mac_peers: AddrMap,
    pub ip_peers: AddrMap,
}

impl DeviceInfo {
    pub fn new(mac: Endpoint) -> Self {
        Self {
            time: TimeInfo::default(),
            mac,
            packets: 0,
            vlans: VNetMap::new(VNetKind::Vlan),
            vxlans: VNetMap::new(VNetKind::Vxlan),
            geneves: VNetMap::new(VNetKind::Geneve),
            powerline: PropInfo::new("Powerline"),
            bridge: PropInfo::new("Bridge"),
            dhcp: PropInfo::new("DHCP Server"),
            router: PropInfo::new("Router"),
            prefixes: PrefixList::default(),
            ucasts: AddrMap::new("Unicast Addresses"),
            mcasts: AddrMap::new("Multicast Addresses"),
            mac_peers: AddrMap::new("MAC Peers"),
            ip_peers: AddrMap::new("IP Peers"),
        }
    }

    /// True if any role flag is set or the device was seen on a virtual network
    pub fn has_properties(&self) -> bool {
        self.bridge.is_enabled()
            || self.dhcp.is_enabled()
            || self.router.is_enabled()
            || self.powerline.is_enabled()
            || !self.vlans.is_empty()
            || !self.vxlans.is_empty()
            || !self.geneves.is_empty()
    }

    fn write_properties(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Properties:")?;
        for prop in [&self.bridge, &self.dhcp, &self.router] {
            if prop.is_enabled() {
                writeln!(f, "    {}", prop)?;
            }
        }
        write!(f, "{}", self.prefixes)?;
        if self.powerline.is_enabled() {
            writeln!(f, "    {}", self.powerline)?;
        }
        write!(f, "{}{}{}", self.vlans, self.vxlans, self.geneves)
    }
}

impl Timestamped for DeviceInfo {
    fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    fn time_info_mut(&mut self) -> &mut TimeInfo {
        &mut self.time
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MAC: {:<43} (age: {:.0}, pkts: {})",
            self.mac,
            self.age(),
            self.packets
        )?;
        if self.has_properties() {
            self.write_properties(f)?;
        }
        write!(
            f,
            "{}{}{}{}",
            self.ucasts, self.mcasts, self.mac_peers, self.ip_peers
        )
    }
}
