use tracing::debug;

use crate::device::{DeviceInfo, DeviceMap, Endpoint};
use crate::packet::DecodedPacket;
use crate::packet::layers::{GroupRecord, Igmp, Mld, RecordType};

use super::{add_ucast, source_device};

pub(super) fn parse_igmp(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(igmp) = &packet.igmp else {
        return;
    };
    let Some(device) = source_device(devices, packet) else {
        return;
    };
    add_ucast(device, packet.net_src);

    match igmp {
        Igmp::Query => {
            debug!("IGMP Membership Query");
            // only routers send queries
            device.router.enable(packet.timestamp);
        }
        Igmp::ReportV1 { group } => {
            debug!("IGMPv1 Membership Report");
            device.mcasts.add((*group).into());
        }
        Igmp::ReportV2 { group } => {
            debug!("IGMPv2 Membership Report");
            device.mcasts.add((*group).into());
        }
        Igmp::Leave { group } => {
            debug!("IGMPv2 Leave Group");
            device.mcasts.del(&(*group).into());
        }
        Igmp::ReportV3 { records } => {
            debug!("IGMPv3 Membership Report");
            apply_records(device, records);
        }
    }
}

pub(super) fn parse_mld(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(mld) = &packet.mld else {
        return;
    };
    let Some(device) = source_device(devices, packet) else {
        return;
    };
    add_ucast(device, packet.net_src);

    match mld {
        Mld::QueryV1 => {
            debug!("MLDv1 Multicast Listener Query");
            device.router.enable(packet.timestamp);
        }
        Mld::ReportV1 { group } => {
            debug!("MLDv1 Multicast Listener Report");
            device.mcasts.add((*group).into());
        }
        Mld::DoneV1 { group } => {
            debug!("MLDv1 Multicast Listener Done");
            device.mcasts.del(&(*group).into());
        }
        Mld::QueryV2 => {
            debug!("MLDv2 Multicast Listener Query");
            device.router.enable(packet.timestamp);
        }
        Mld::ReportV2 { records } => {
            debug!("MLDv2 Multicast Listener Report");
            apply_records(device, records);
        }
    }
}

/// Exclude-mode records mean the device listens to the group, include-mode
/// records that it stopped. Source lists are not tracked.
fn apply_records(device: &mut DeviceInfo, records: &[GroupRecord]) {
    for record in records {
        let group = Endpoint::from(record.group);
        match record.kind {
            RecordType::IsExclude | RecordType::ToExclude => {
                device.mcasts.add(group);
            }
            RecordType::IsInclude | RecordType::ToInclude => {
                device.mcasts.del(&group);
            }
            RecordType::AllowNew | RecordType::BlockOld => {}
        }
    }
}
