use chrono::{DateTime, Utc};

use crate::device::{AddrMap, DeviceMap, Endpoint, Timestamped};
use crate::packet::DecodedPacket;

use super::source_device;

pub(super) fn parse_src_mac(devices: &mut DeviceMap, packet: &DecodedPacket) {
    if let Some(mac) = packet.link_src {
        devices.add(mac);
    }
}

/// Records where the source device sends traffic to
pub(super) fn parse_peers(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(device) = source_device(devices, packet) else {
        return;
    };
    if let Some(mac) = packet.link_dst {
        device.mac_peers.add(mac);
    }
    if let Some(ip) = packet.net_dst {
        device.ip_peers.add(ip);
    }
}

/// Counts the packet and refreshes the source device. Address entries are
/// refreshed only if a protocol handler created them before.
pub(super) fn update_statistics(devices: &mut DeviceMap, packet: &DecodedPacket) {
    devices.packets += 1;

    let Some(mac) = packet.link_src else {
        return;
    };
    let Some(device) = devices.get_mut(&mac) else {
        return;
    };
    device.packets += 1;
    device.set_timestamp(packet.timestamp);

    refresh(&mut device.ucasts, packet.net_src, packet.timestamp);
    refresh(&mut device.mac_peers, packet.link_dst, packet.timestamp);
    refresh(&mut device.ip_peers, packet.net_dst, packet.timestamp);
}

fn refresh(map: &mut AddrMap, addr: Option<Endpoint>, timestamp: Option<DateTime<Utc>>) {
    let Some(addr) = addr else {
        return;
    };
    if let Some(entry) = map.get_mut(&addr) {
        entry.packets += 1;
        entry.set_timestamp(timestamp);
    }
}
