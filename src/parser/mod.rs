//! Applies decoded packets to the device table.
//!
//! Each protocol handler looks at one layer of the packet and creates,
//! updates or removes table entries. [`Parser::parse`] runs all of them in a
//! fixed order: the source MAC handler comes first so that every later
//! handler finds its device, and statistics come last so that they only
//! refresh entries the protocol handlers created.

mod link;
mod multicast;
mod neighbor;
mod roles;
mod vnet;

use crate::device::{DeviceInfo, DeviceMap, Endpoint};
use crate::packet::DecodedPacket;

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    peers: bool,
}

impl Parser {
    /// `peers` enables recording of the destinations each device talks to
    pub fn new(peers: bool) -> Self {
        Self { peers }
    }

    /// Runs every handler on `packet`. The caller holds the table lock.
    pub fn parse(&self, devices: &mut DeviceMap, packet: &DecodedPacket) {
        link::parse_src_mac(devices, packet);
        if self.peers {
            link::parse_peers(devices, packet);
        }
        vnet::parse_vlan(devices, packet);
        vnet::parse_vxlan(devices, packet);
        vnet::parse_geneve(devices, packet);
        neighbor::parse_arp(devices, packet);
        neighbor::parse_ndp(devices, packet);
        multicast::parse_igmp(devices, packet);
        multicast::parse_mld(devices, packet);
        roles::parse_dhcp(devices, packet);
        roles::parse_stp(devices, packet);
        roles::parse_plc(devices, packet);
        link::update_statistics(devices, packet);
    }
}

/// The device that sent `packet`, created if needed
fn source_device<'a>(
    devices: &'a mut DeviceMap,
    packet: &DecodedPacket,
) -> Option<&'a mut DeviceInfo> {
    let mac = packet.link_src?;
    Some(devices.add(mac))
}

fn add_ucast(device: &mut DeviceInfo, addr: Option<Endpoint>) {
    if let Some(addr) = addr {
        device.ucasts.add(addr);
    }
}
