use pnet::packet::ethernet::EtherType;
use tracing::debug;

use crate::device::DeviceMap;
use crate::packet::DecodedPacket;
use crate::packet::layers::{DhcpOp, Dhcpv6MsgType};

use super::{add_ucast, source_device};

const HOMEPLUG_AV: EtherType = EtherType(0x88e1);
const HOMEPLUG_GREEN_PHY: EtherType = EtherType(0x8912);

/// DHCP replies mark a DHCPv4 server. For DHCPv6 the message types only
/// servers send are used instead.
pub(super) fn parse_dhcp(devices: &mut DeviceMap, packet: &DecodedPacket) {
    if let Some(op) = packet.dhcpv4 {
        if let Some(device) = source_device(devices, packet) {
            match op {
                DhcpOp::Request => debug!("DHCP Request"),
                DhcpOp::Reply => {
                    debug!("DHCP Reply");
                    device.dhcp.enable(packet.timestamp);
                }
            }
        }
    }

    if let Some(msg_type) = packet.dhcpv6 {
        if let Some(device) = source_device(devices, packet) {
            add_ucast(device, packet.net_src);
            debug!("DHCPv6 {:?}", msg_type);
            if is_server_message(msg_type) {
                device.dhcp.enable(packet.timestamp);
            }
        }
    }
}

fn is_server_message(msg_type: Dhcpv6MsgType) -> bool {
    matches!(
        msg_type,
        Dhcpv6MsgType::Request
            | Dhcpv6MsgType::Reply
            | Dhcpv6MsgType::Reconfigure
            | Dhcpv6MsgType::RelayReply
    )
}

pub(super) fn parse_stp(devices: &mut DeviceMap, packet: &DecodedPacket) {
    if !packet.stp {
        return;
    }
    debug!("STP packet");
    if let Some(device) = source_device(devices, packet) {
        device.bridge.enable(packet.timestamp);
    }
}

pub(super) fn parse_plc(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(ether_type) = packet.ether_type else {
        return;
    };
    if ether_type != HOMEPLUG_AV && ether_type != HOMEPLUG_GREEN_PHY {
        return;
    }
    debug!("PLC packet");
    if let Some(device) = source_device(devices, packet) {
        device.powerline.enable(packet.timestamp);
    }
}
