use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::endpoint::{Endpoint, EndpointType};
use super::time_info::{TimeInfo, Timestamped};

/// An address seen in association with a device
#[derive(Debug, Clone)]
pub struct AddrInfo {
    time: TimeInfo,
    pub addr: Endpoint,
    pub packets: u64,
}

impl AddrInfo {
    fn new(addr: Endpoint) -> Self {
        Self {
            time: TimeInfo::default(),
            addr,
            packets: 0,
        }
    }
}

impl Timestamped for AddrInfo {
    fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    fn time_info_mut(&mut self) -> &mut TimeInfo {
        &mut self.time
    }
}

impl fmt::Display for AddrInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr.endpoint_type() {
            EndpointType::Mac => write!(
                f,
                "MAC: {:<39} (age: {:.0}, pkts: {})",
                self.addr,
                self.age(),
                self.packets
            ),
            EndpointType::Ipv4 | EndpointType::Ipv6 => write!(
                f,
                "IP: {:<40} (age: {:.0}, pkts: {})",
                self.addr,
                self.age(),
                self.packets
            ),
        }
    }
}

/// Named set of addresses keyed by endpoint.
///
/// Unspecified addresses are never stored.
#[derive(Debug, Clone)]
pub struct AddrMap {
    name: &'static str,
    entries: BTreeMap<Endpoint, AddrInfo>,
}

impl AddrMap {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
        }
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the entry for `addr`, creating an empty one first if needed.
    /// Returns `None` for unspecified addresses.
    pub fn add(&mut self, addr: Endpoint) -> Option<&mut AddrInfo> {
        if !addr.is_specified() {
            return None;
        }
        let entry = self.entries.entry(addr).or_insert_with(|| {
            debug!("Adding new address entry {}", addr);
            AddrInfo::new(addr)
        });
        Some(entry)
    }

    #[allow(dead_code)]
    pub fn get(&self, addr: &Endpoint) -> Option<&AddrInfo> {
        self.entries.get(addr)
    }

    pub fn get_mut(&mut self, addr: &Endpoint) -> Option<&mut AddrInfo> {
        self.entries.get_mut(addr)
    }

    pub fn del(&mut self, addr: &Endpoint) -> Option<AddrInfo> {
        let removed = self.entries.remove(addr);
        if removed.is_some() {
            debug!("Deleting address entry {}", addr);
        }
        removed
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddrInfo> {
        self.entries.values()
    }
}

impl fmt::Display for AddrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return Ok(());
        }
        writeln!(f, "  {}:", self.name)?;
        for addr in self.entries.values() {
            writeln!(f, "    {}", addr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pnet::util::MacAddr;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_add_rejects_unspecified() {
        let mut map = AddrMap::new("Unicast Addresses");
        assert!(map.add(MacAddr::zero().into()).is_none());
        assert!(map.add(Ipv4Addr::UNSPECIFIED.into()).is_none());
        assert!(map.add(Ipv6Addr::UNSPECIFIED.into()).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut map = AddrMap::new("Unicast Addresses");
        let addr = Endpoint::from(Ipv4Addr::new(192, 0, 2, 1));

        map.add(addr).unwrap().packets += 1;
        map.add(addr).unwrap().packets += 1;

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&addr).unwrap().packets, 2);
    }

    #[test]
    fn test_get_does_not_create() {
        let mut map = AddrMap::new("IP Peers");
        let addr = Endpoint::from(Ipv4Addr::new(192, 0, 2, 1));
        assert!(map.get(&addr).is_none());
        assert!(map.get_mut(&addr).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_del() {
        let mut map = AddrMap::new("Multicast Addresses");
        let group = Endpoint::from(Ipv4Addr::new(239, 1, 1, 1));
        map.add(group);

        assert!(map.del(&Endpoint::from(Ipv4Addr::new(239, 1, 1, 2))).is_none());
        assert_eq!(map.len(), 1);
        assert!(map.del(&group).is_some());
        assert!(map.is_empty());
    }

    #[test]
    fn test_entry_timestamp() {
        let mut map = AddrMap::new("Unicast Addresses");
        let entry = map.add(Ipv4Addr::new(192, 0, 2, 1).into()).unwrap();
        assert_eq!(entry.age(), -1.0);
        entry.set_timestamp(Some(Utc::now()));
        assert!(entry.age() >= 0.0);
    }

    #[test]
    fn test_display_sorted() {
        let mut map = AddrMap::new("MAC Peers");
        assert_eq!(map.to_string(), "");

        map.add(MacAddr::new(6, 5, 4, 3, 2, 1).into());
        map.add(MacAddr::new(1, 2, 3, 4, 5, 6).into());
        map.add(Ipv4Addr::new(127, 0, 0, 1).into());

        let want = format!(
            "  MAC Peers:\n    MAC: {:<39} (age: -1, pkts: 0)\n    MAC: {:<39} (age: -1, pkts: 0)\n    IP: {:<40} (age: -1, pkts: 0)\n",
            "01:02:03:04:05:06", "06:05:04:03:02:01", "127.0.0.1"
        );
        assert_eq!(map.to_string(), want);
        assert_eq!(map.name(), "MAC Peers");
    }
}
