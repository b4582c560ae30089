use std::net::{IpAddr, Ipv6Addr};

use num_traits::FromPrimitive;
use pnet::packet::icmpv6::ndp::NeighborAdvertPacket;
use pnet::packet::icmpv6::{Icmpv6Packet, Icmpv6Type, Icmpv6Types};

use super::layers::{GroupRecord, Mld, Ndp, RecordType};

const MLD_QUERY: Icmpv6Type = Icmpv6Type(130);
const MLD_REPORT_V1: Icmpv6Type = Icmpv6Type(131);
const MLD_DONE_V1: Icmpv6Type = Icmpv6Type(132);
const MLD_REPORT_V2: Icmpv6Type = Icmpv6Type(143);

/// Fixed part of a router advertisement before its options
const RA_HEADER_LEN: usize = 16;
const OPT_PREFIX_INFO: u8 = 3;
const PREFIX_INFO_BODY_LEN: usize = 30;
/// Shortest MLDv2 query; v1 queries are 24 bytes
const MLD_V2_QUERY_LEN: usize = 28;

#[derive(Debug, PartialEq)]
pub enum Icmpv6Message {
    Ndp(Ndp),
    Mld(Mld),
}

/// Decodes the neighbor discovery and multicast listener messages in an
/// ICMPv6 payload. Anything else, or anything truncated, yields `None`.
pub fn decode(data: &[u8]) -> Option<Icmpv6Message> {
    let icmpv6 = Icmpv6Packet::new(data)?;
    let message = match icmpv6.get_icmpv6_type() {
        Icmpv6Types::NeighborSolicit => Icmpv6Message::Ndp(Ndp::NeighborSolicitation),
        Icmpv6Types::NeighborAdvert => {
            let advert = NeighborAdvertPacket::new(data)?;
            Icmpv6Message::Ndp(Ndp::NeighborAdvertisement {
                target: advert.get_target_addr(),
            })
        }
        Icmpv6Types::RouterSolicit => Icmpv6Message::Ndp(Ndp::RouterSolicitation),
        Icmpv6Types::RouterAdvert => {
            if data.len() < RA_HEADER_LEN {
                return None;
            }
            Icmpv6Message::Ndp(Ndp::RouterAdvertisement {
                prefixes: prefix_options(&data[RA_HEADER_LEN..]),
            })
        }
        MLD_QUERY if data.len() >= MLD_V2_QUERY_LEN => Icmpv6Message::Mld(Mld::QueryV2),
        MLD_QUERY => Icmpv6Message::Mld(Mld::QueryV1),
        MLD_REPORT_V1 => Icmpv6Message::Mld(Mld::ReportV1 {
            group: ipv6_at(data, 8)?,
        }),
        MLD_DONE_V1 => Icmpv6Message::Mld(Mld::DoneV1 {
            group: ipv6_at(data, 8)?,
        }),
        MLD_REPORT_V2 => Icmpv6Message::Mld(Mld::ReportV2 {
            records: mld_records(data)?,
        }),
        _ => return None,
    };
    Some(message)
}

fn ipv6_at(data: &[u8], offset: usize) -> Option<Ipv6Addr> {
    let bytes: [u8; 16] = data.get(offset..offset + 16)?.try_into().ok()?;
    Some(Ipv6Addr::from(bytes))
}

/// Collects Prefix Information option bodies, stopping at the first
/// malformed option.
fn prefix_options(mut options: &[u8]) -> Vec<Vec<u8>> {
    let mut prefixes = Vec::new();
    while options.len() >= 2 {
        let kind = options[0];
        let len = options[1] as usize * 8;
        if len == 0 || len > options.len() {
            break;
        }
        let body = &options[2..len];
        if kind == OPT_PREFIX_INFO && body.len() >= PREFIX_INFO_BODY_LEN {
            prefixes.push(body[..PREFIX_INFO_BODY_LEN].to_vec());
        }
        options = &options[len..];
    }
    prefixes
}

fn mld_records(data: &[u8]) -> Option<Vec<GroupRecord>> {
    let count = u16::from_be_bytes([*data.get(6)?, *data.get(7)?]) as usize;
    // the count comes off the wire, each record takes at least 20 bytes
    let mut records = Vec::with_capacity(count.min(data.len() / 20));
    let mut offset = 8;
    for _ in 0..count {
        let header = data.get(offset..offset + 4)?;
        let aux_len = header[1] as usize * 4;
        let sources = u16::from_be_bytes([header[2], header[3]]) as usize;
        let group = ipv6_at(data, offset + 4)?;
        if let Some(kind) = RecordType::from_u8(header[0]) {
            records.push(GroupRecord {
                kind,
                group: IpAddr::V6(group),
            });
        }
        offset += 20 + sources * 16 + aux_len;
    }
    Some(records)
}
