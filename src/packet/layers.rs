//! Typed protocol layers extracted from a frame.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use num_derive::FromPrimitive;
use pnet::packet::arp::ArpOperation;
use pnet::util::MacAddr;

/// ARP request or reply, identity fields only
#[derive(Debug, Clone, PartialEq)]
pub struct Arp {
    pub operation: ArpOperation,
    pub sender_mac: MacAddr,
    pub sender_ip: Ipv4Addr,
}

/// ICMPv6 neighbor discovery messages
#[derive(Debug, Clone, PartialEq)]
pub enum Ndp {
    NeighborSolicitation,
    NeighborAdvertisement { target: Ipv6Addr },
    RouterSolicitation,
    /// Each prefix is the body of a Prefix Information option, without the
    /// option type and length bytes
    RouterAdvertisement { prefixes: Vec<Vec<u8>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum RecordType {
    IsInclude = 1,
    IsExclude = 2,
    ToInclude = 3,
    ToExclude = 4,
    AllowNew = 5,
    BlockOld = 6,
}

/// One group record of an IGMPv3 or MLDv2 report
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub kind: RecordType,
    pub group: IpAddr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Igmp {
    /// Membership query of any version
    Query,
    ReportV1 { group: Ipv4Addr },
    ReportV2 { group: Ipv4Addr },
    Leave { group: Ipv4Addr },
    ReportV3 { records: Vec<GroupRecord> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mld {
    QueryV1,
    ReportV1 { group: Ipv6Addr },
    DoneV1 { group: Ipv6Addr },
    QueryV2,
    ReportV2 { records: Vec<GroupRecord> },
}

/// BOOTP operation code of a DHCPv4 message
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum DhcpOp {
    Request = 1,
    Reply = 2,
}

/// DHCPv6 message types (RFC 8415)
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Dhcpv6MsgType {
    Solicit = 1,
    Advertise = 2,
    Request = 3,
    Confirm = 4,
    Renew = 5,
    Rebind = 6,
    Reply = 7,
    Release = 8,
    Decline = 9,
    Reconfigure = 10,
    InformationRequest = 11,
    RelayForward = 12,
    RelayReply = 13,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vxlan {
    /// The I flag; the VNI is meaningless when it is clear
    pub valid_id: bool,
    pub vni: u32,
}
