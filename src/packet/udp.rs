use num_traits::FromPrimitive;
use pnet::packet::Packet;
use pnet::packet::udp::UdpPacket;

use super::layers::{DhcpOp, Dhcpv6MsgType, Vxlan};

const DHCPV4_SERVER: u16 = 67;
const DHCPV4_CLIENT: u16 = 68;
const DHCPV6_CLIENT: u16 = 546;
const DHCPV6_SERVER: u16 = 547;
const VXLAN: u16 = 4789;
const GENEVE: u16 = 6081;

const BOOTP_HEADER_LEN: usize = 236;
const DHCP_MAGIC_COOKIE: [u8; 4] = [0x63, 0x82, 0x53, 0x63];
const VXLAN_FLAG_VALID_ID: u8 = 0x08;

/// Payload protocols recognised by UDP port
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UdpMessage {
    Dhcpv4(DhcpOp),
    Dhcpv6(Dhcpv6MsgType),
    Vxlan(Vxlan),
    Geneve(u32),
}

/// Identifies the payload of a UDP datagram by its destination port, then its
/// source port.
pub fn decode(udp: &UdpPacket) -> Option<UdpMessage> {
    let payload = udp.payload();
    [udp.get_destination(), udp.get_source()]
        .into_iter()
        .find_map(|port| decode_port(port, payload))
}

fn decode_port(port: u16, payload: &[u8]) -> Option<UdpMessage> {
    match port {
        DHCPV4_SERVER | DHCPV4_CLIENT => {
            let cookie = payload.get(BOOTP_HEADER_LEN..BOOTP_HEADER_LEN + 4)?;
            if cookie != DHCP_MAGIC_COOKIE {
                return None;
            }
            DhcpOp::from_u8(payload[0]).map(UdpMessage::Dhcpv4)
        }
        DHCPV6_CLIENT | DHCPV6_SERVER => {
            Dhcpv6MsgType::from_u8(*payload.first()?).map(UdpMessage::Dhcpv6)
        }
        VXLAN => {
            let header = payload.get(..8)?;
            Some(UdpMessage::Vxlan(Vxlan {
                valid_id: header[0] & VXLAN_FLAG_VALID_ID != 0,
                vni: vni(header),
            }))
        }
        GENEVE => {
            let header = payload.get(..8)?;
            Some(UdpMessage::Geneve(vni(header)))
        }
        _ => None,
    }
}

/// 24-bit network identifier at bytes 4..7 of a VXLAN or Geneve header
fn vni(header: &[u8]) -> u32 {
    u32::from_be_bytes([0, header[4], header[5], header[6]])
}
