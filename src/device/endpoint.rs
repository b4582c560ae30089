//! Link-layer and network-layer addresses as seen on the wire.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::util::MacAddr;

/// Kind of address stored in an [`Endpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointType {
    Mac,
    Ipv4,
    Ipv6,
}

/// A MAC, IPv4 or IPv6 address.
///
/// Endpoints order by type first (MAC < IPv4 < IPv6) and then by address, so
/// collections keyed by endpoint iterate in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Mac(MacAddr),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl Endpoint {
    pub fn endpoint_type(&self) -> EndpointType {
        match self {
            Endpoint::Mac(_) => EndpointType::Mac,
            Endpoint::Ipv4(_) => EndpointType::Ipv4,
            Endpoint::Ipv6(_) => EndpointType::Ipv6,
        }
    }

    /// Address bytes in network order
    #[allow(dead_code)]
    pub fn raw(&self) -> Vec<u8> {
        match self {
            Endpoint::Mac(mac) => vec![mac.0, mac.1, mac.2, mac.3, mac.4, mac.5],
            Endpoint::Ipv4(addr) => addr.octets().to_vec(),
            Endpoint::Ipv6(addr) => addr.octets().to_vec(),
        }
    }

    /// False for the all-zero address of each type (`00:00:00:00:00:00`,
    /// `0.0.0.0`, `::`)
    pub fn is_specified(&self) -> bool {
        match self {
            Endpoint::Mac(mac) => *mac != MacAddr::zero(),
            Endpoint::Ipv4(addr) => !addr.is_unspecified(),
            Endpoint::Ipv6(addr) => !addr.is_unspecified(),
        }
    }

    /// Group addresses: MACs with the I/G bit set and IP multicast ranges
    #[allow(dead_code)]
    pub fn is_multicast(&self) -> bool {
        match self {
            Endpoint::Mac(_) => self.raw()[0] & 0x01 != 0,
            Endpoint::Ipv4(addr) => addr.is_multicast(),
            Endpoint::Ipv6(addr) => addr.is_multicast(),
        }
    }
}

impl From<MacAddr> for Endpoint {
    fn from(mac: MacAddr) -> Self {
        Endpoint::Mac(mac)
    }
}

impl From<Ipv4Addr> for Endpoint {
    fn from(addr: Ipv4Addr) -> Self {
        Endpoint::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for Endpoint {
    fn from(addr: Ipv6Addr) -> Self {
        Endpoint::Ipv6(addr)
    }
}

impl From<IpAddr> for Endpoint {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Endpoint::Ipv4(v4),
            IpAddr::V6(v6) => Endpoint::Ipv6(v6),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so that width specifiers in the table layout apply
        let text = match self {
            Endpoint::Mac(mac) => mac.to_string(),
            Endpoint::Ipv4(addr) => addr.to_string(),
            Endpoint::Ipv6(addr) => addr.to_string(),
        };
        f.pad(&text)
    }
}
