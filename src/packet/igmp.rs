use std::net::{IpAddr, Ipv4Addr};

use num_traits::FromPrimitive;

use super::layers::{GroupRecord, Igmp, RecordType};

const MEMBERSHIP_QUERY: u8 = 0x11;
const MEMBERSHIP_REPORT_V1: u8 = 0x12;
const MEMBERSHIP_REPORT_V2: u8 = 0x16;
const LEAVE_GROUP: u8 = 0x17;
const MEMBERSHIP_REPORT_V3: u8 = 0x22;

/// Decodes an IGMP message. Unknown types and truncated messages yield `None`.
pub fn decode(data: &[u8]) -> Option<Igmp> {
    let igmp = match *data.first()? {
        MEMBERSHIP_QUERY => Igmp::Query,
        MEMBERSHIP_REPORT_V1 => Igmp::ReportV1 {
            group: ipv4_at(data, 4)?,
        },
        MEMBERSHIP_REPORT_V2 => Igmp::ReportV2 {
            group: ipv4_at(data, 4)?,
        },
        LEAVE_GROUP => Igmp::Leave {
            group: ipv4_at(data, 4)?,
        },
        MEMBERSHIP_REPORT_V3 => Igmp::ReportV3 {
            records: group_records(data)?,
        },
        _ => return None,
    };
    Some(igmp)
}

fn ipv4_at(data: &[u8], offset: usize) -> Option<Ipv4Addr> {
    let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
    Some(Ipv4Addr::from(bytes))
}

fn group_records(data: &[u8]) -> Option<Vec<GroupRecord>> {
    let count = u16::from_be_bytes([*data.get(6)?, *data.get(7)?]) as usize;
    // the count comes off the wire, each record takes at least 8 bytes
    let mut records = Vec::with_capacity(count.min(data.len() / 8));
    let mut offset = 8;
    for _ in 0..count {
        let header = data.get(offset..offset + 4)?;
        let aux_len = header[1] as usize * 4;
        let sources = u16::from_be_bytes([header[2], header[3]]) as usize;
        let group = ipv4_at(data, offset + 4)?;
        if let Some(kind) = RecordType::from_u8(header[0]) {
            records.push(GroupRecord {
                kind,
                group: IpAddr::V4(group),
            });
        }
        offset += 8 + sources * 4 + aux_len;
    }
    Some(records)
}
