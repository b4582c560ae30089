//! Frame decoding. Turns a captured Ethernet frame into a [`DecodedPacket`]
//! holding only the layers the device table cares about.

mod icmpv6;
mod igmp;
pub mod layers;
mod udp;

use chrono::{DateTime, Utc};
use pnet::packet::Packet;
use pnet::packet::arp::ArpPacket;
use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket};
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use pnet::packet::udp::UdpPacket;
use pnet::packet::vlan::VlanPacket;
use tracing::trace;

use crate::device::Endpoint;
use icmpv6::Icmpv6Message;
use layers::{Arp, DhcpOp, Dhcpv6MsgType, Igmp, Mld, Ndp, Vxlan};
use udp::UdpMessage;

/// Largest value of the 802.3 length field; larger values are EtherTypes
const MAX_8023_LENGTH: u16 = 0x05ff;
const LLC_SAP_STP: u8 = 0x42;
const VLAN_TAG_LEN: usize = 4;

/// Layers of one frame. A layer the frame lacks, or that failed to decode, is
/// `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedPacket {
    /// Capture time; `None` when the frame carries no capture metadata
    pub timestamp: Option<DateTime<Utc>>,
    pub link_src: Option<Endpoint>,
    pub link_dst: Option<Endpoint>,
    pub net_src: Option<Endpoint>,
    pub net_dst: Option<Endpoint>,
    /// EtherType after any VLAN tags
    pub ether_type: Option<EtherType>,
    /// Outermost VLAN identifier
    pub vlan: Option<u16>,
    pub arp: Option<Arp>,
    pub ndp: Option<Ndp>,
    pub igmp: Option<Igmp>,
    pub mld: Option<Mld>,
    pub dhcpv4: Option<DhcpOp>,
    pub dhcpv6: Option<Dhcpv6MsgType>,
    pub stp: bool,
    pub vxlan: Option<Vxlan>,
    pub geneve: Option<u32>,
}

impl DecodedPacket {
    /// Decodes raw frame bytes; `None` if they do not hold an Ethernet header
    pub fn from_bytes(data: &[u8], timestamp: Option<DateTime<Utc>>) -> Option<Self> {
        EthernetPacket::new(data).map(|ethernet| decode(&ethernet, timestamp))
    }

    fn decode_ipv4(&mut self, ipv4: &Ipv4Packet) {
        self.net_src = Some(ipv4.get_source().into());
        self.net_dst = Some(ipv4.get_destination().into());
        // payload() already skips header options
        self.decode_transport(ipv4.get_next_level_protocol(), ipv4.payload());
    }

    fn decode_ipv6(&mut self, ipv6: &Ipv6Packet) {
        self.net_src = Some(ipv6.get_source().into());
        self.net_dst = Some(ipv6.get_destination().into());
        let payload = ipv6.payload();
        if let Some((next, payload)) = skip_extension_headers(ipv6.get_next_header(), payload) {
            self.decode_transport(next, payload);
        }
    }

    fn decode_transport(&mut self, protocol: IpNextHeaderProtocol, payload: &[u8]) {
        match protocol {
            IpNextHeaderProtocols::Igmp => self.igmp = igmp::decode(payload),
            IpNextHeaderProtocols::Icmpv6 => match icmpv6::decode(payload) {
                Some(Icmpv6Message::Ndp(ndp)) => self.ndp = Some(ndp),
                Some(Icmpv6Message::Mld(mld)) => self.mld = Some(mld),
                None => {}
            },
            IpNextHeaderProtocols::Udp => {
                let Some(datagram) = UdpPacket::new(payload) else {
                    return;
                };
                match udp::decode(&datagram) {
                    Some(UdpMessage::Dhcpv4(op)) => self.dhcpv4 = Some(op),
                    Some(UdpMessage::Dhcpv6(msg_type)) => self.dhcpv6 = Some(msg_type),
                    Some(UdpMessage::Vxlan(vxlan)) => self.vxlan = Some(vxlan),
                    Some(UdpMessage::Geneve(vni)) => self.geneve = Some(vni),
                    None => {}
                }
            }
            _ => {}
        }
    }
}

/// Decodes the layers of an Ethernet frame. Never fails: decoding stops at the
/// first layer that is truncated or not understood.
pub fn decode(ethernet: &EthernetPacket, timestamp: Option<DateTime<Utc>>) -> DecodedPacket {
    let mut packet = DecodedPacket {
        timestamp,
        link_src: Some(ethernet.get_source().into()),
        link_dst: Some(ethernet.get_destination().into()),
        ..Default::default()
    };

    let mut ether_type = ethernet.get_ethertype();
    let mut payload = ethernet.payload();
    while matches!(
        ether_type,
        EtherTypes::Vlan | EtherTypes::PBridge | EtherTypes::QinQ
    ) {
        let Some(tag) = VlanPacket::new(payload) else {
            trace!("Truncated VLAN tag");
            return packet;
        };
        packet.vlan.get_or_insert(tag.get_vlan_identifier());
        ether_type = tag.get_ethertype();
        payload = &payload[VLAN_TAG_LEN..];
    }
    packet.ether_type = Some(ether_type);

    match ether_type {
        EtherTypes::Arp => {
            if let Some(arp) = ArpPacket::new(payload) {
                packet.arp = Some(Arp {
                    operation: arp.get_operation(),
                    sender_mac: arp.get_sender_hw_addr(),
                    sender_ip: arp.get_sender_proto_addr(),
                });
            }
        }
        EtherTypes::Ipv4 => {
            if let Some(ipv4) = Ipv4Packet::new(payload) {
                packet.decode_ipv4(&ipv4);
            }
        }
        EtherTypes::Ipv6 => {
            if let Some(ipv6) = Ipv6Packet::new(payload) {
                packet.decode_ipv6(&ipv6);
            }
        }
        EtherType(length) if length <= MAX_8023_LENGTH => {
            packet.stp = payload.len() >= 3
                && payload[0] == LLC_SAP_STP
                && payload[1] == LLC_SAP_STP;
        }
        _ => {}
    }
    packet
}

/// Walks past hop-by-hop, routing, destination options and fragment headers
fn skip_extension_headers(
    mut next: IpNextHeaderProtocol,
    mut payload: &[u8],
) -> Option<(IpNextHeaderProtocol, &[u8])> {
    loop {
        let len = match next {
            IpNextHeaderProtocols::Hopopt
            | IpNextHeaderProtocols::Ipv6Route
            | IpNextHeaderProtocols::Ipv6Opts => (*payload.get(1)? as usize + 1) * 8,
            IpNextHeaderProtocols::Ipv6Frag => 8,
            _ => return Some((next, payload)),
        };
        next = IpNextHeaderProtocol(*payload.first()?);
        payload = payload.get(len..)?;
    }
}
