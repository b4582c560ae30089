use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::device_info::DeviceInfo;
use super::endpoint::Endpoint;

const TABLE_RULE: &str =
    "======================================================================";

/// The device table: every device seen, keyed by MAC address, plus the total
/// number of packets processed
#[derive(Debug, Clone, Default)]
pub struct DeviceMap {
    pub packets: u64,
    devices: BTreeMap<Endpoint, DeviceInfo>,
}

impl DeviceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the device with `mac`, creating it first if needed
    pub fn add(&mut self, mac: Endpoint) -> &mut DeviceInfo {
        self.devices.entry(mac).or_insert_with(|| {
            debug!("Adding new device entry {}", mac);
            DeviceInfo::new(mac)
        })
    }

    #[allow(dead_code)]
    pub fn get(&self, mac: &Endpoint) -> Option<&DeviceInfo> {
        self.devices.get(mac)
    }

    pub fn get_mut(&mut self, mac: &Endpoint) -> Option<&mut DeviceInfo> {
        self.devices.get_mut(mac)
    }

    /// Drops all devices and zeroes the packet counter
    pub fn reset(&mut self) {
        self.devices.clear();
        self.packets = 0;
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices in ascending MAC order
    pub fn iter(&self) -> impl Iterator<Item = &DeviceInfo> {
        self.devices.values()
    }
}

impl fmt::Display for DeviceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TABLE_RULE)?;
        writeln!(f, "Devices: {:<39} (pkts: {})", self.len(), self.packets)?;
        writeln!(f, "{}", TABLE_RULE)?;
        for device in self.devices.values() {
            writeln!(f, "{}", device)?;
        }
        Ok(())
    }
}
