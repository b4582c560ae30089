use pnet::packet::arp::ArpOperations;
use tracing::debug;

use crate::device::{DeviceMap, Endpoint, Timestamped};
use crate::packet::DecodedPacket;
use crate::packet::layers::Ndp;

use super::{add_ucast, source_device};

/// ARP announces the sender's addresses. They are taken from the ARP payload,
/// not the Ethernet header.
pub(super) fn parse_arp(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(arp) = &packet.arp else {
        return;
    };
    match arp.operation {
        ArpOperations::Request => debug!("ARP Request"),
        ArpOperations::Reply => debug!("ARP Reply"),
        _ => {}
    }
    let device = devices.add(arp.sender_mac.into());
    device.ucasts.add(arp.sender_ip.into());
}

pub(super) fn parse_ndp(devices: &mut DeviceMap, packet: &DecodedPacket) {
    let Some(ndp) = &packet.ndp else {
        return;
    };
    let Some(device) = source_device(devices, packet) else {
        return;
    };
    match ndp {
        Ndp::NeighborSolicitation => {
            debug!("Neighbor Solicitation");
            add_ucast(device, packet.net_src);
        }
        Ndp::NeighborAdvertisement { target } => {
            debug!("Neighbor Advertisement");
            add_ucast(device, Some(Endpoint::from(*target)));
        }
        Ndp::RouterSolicitation => {
            debug!("Router Solicitation");
            add_ucast(device, packet.net_src);
        }
        Ndp::RouterAdvertisement { prefixes } => {
            debug!("Router Advertisement");
            add_ucast(device, packet.net_src);
            device.router.enable(packet.timestamp);

            // an advertisement carries the router's full prefix set
            device.prefixes.clear();
            for option in prefixes {
                device
                    .prefixes
                    .add(option.clone())
                    .set_timestamp(packet.timestamp);
            }
        }
    }
}
