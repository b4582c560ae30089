use tracing::debug;

use crate::device::{DeviceMap, Timestamped, VNetMap};
use crate::packet::DecodedPacket;

use super::source_device;

pub(super) fn parse_vlan(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(vlan) = packet.vlan else {
        return;
    };
    debug!("VLAN Tag");
    if let Some(device) = source_device(devices, packet) {
        count(&mut device.vlans, u32::from(vlan), packet);
    }
}

pub(super) fn parse_vxlan(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(vxlan) = packet.vxlan else {
        return;
    };
    debug!("VXLAN Header");
    if !vxlan.valid_id {
        return;
    }
    if let Some(device) = source_device(devices, packet) {
        count(&mut device.vxlans, vxlan.vni, packet);
    }
}

pub(super) fn parse_geneve(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(vni) = packet.geneve else {
        return;
    };
    debug!("Geneve Header");
    if let Some(device) = source_device(devices, packet) {
        count(&mut device.geneves, vni, packet);
    }
}

fn count(vnets: &mut VNetMap, id: u32, packet: &DecodedPacket) {
    let vnet = vnets.add(id);
    vnet.set_timestamp(packet.timestamp);
    vnet.packets += 1;
}
