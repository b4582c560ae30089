use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::{MutableIpv4Packet, checksum};
use pnet::packet::ipv6::MutableIpv6Packet;
use pnet::packet::udp::MutableUdpPacket;
use pnet::packet::vlan::MutableVlanPacket;
use pnet::util::MacAddr;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::packet::DecodedPacket;

/// Builder for creating synthetic Ethernet frames for testing
pub struct FrameBuilder;

impl FrameBuilder {
    /// Ethernet header followed by `payload`
    pub fn ethernet(
        src_mac: &str,
        dst_mac: &str,
        ether_type: EtherType,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut buffer = vec![0u8; 14 + payload.len()];

        let mut eth_packet = MutableEthernetPacket::new(&mut buffer[..]).unwrap();
        eth_packet.set_source(src_mac.parse::<MacAddr>().unwrap());
        eth_packet.set_destination(dst_mac.parse::<MacAddr>().unwrap());
        eth_packet.set_ethertype(ether_type);
        eth_packet.set_payload(payload);

        buffer
    }

    /// Inserts an 802.1Q tag in front of the frame's EtherType
    pub fn vlan_tagged(frame: &[u8], vlan_id: u16) -> Vec<u8> {
        let eth_packet = EthernetPacket::new(frame).unwrap();
        let mut tag = vec![0u8; 4 + eth_packet.payload().len()];

        let mut vlan_packet = MutableVlanPacket::new(&mut tag[..]).unwrap();
        vlan_packet.set_vlan_identifier(vlan_id);
        vlan_packet.set_ethertype(eth_packet.get_ethertype());
        vlan_packet.set_payload(eth_packet.payload());

        Self::ethernet(
            &eth_packet.get_source().to_string(),
            &eth_packet.get_destination().to_string(),
            EtherTypes::Vlan,
            &tag,
        )
    }

    /// Broadcast ARP request announcing `sender_mac`/`sender_ip`
    pub fn arp(src_mac: &str, sender_mac: &str, sender_ip: &str) -> Vec<u8> {
        let mut buffer = vec![0u8; 28];

        let mut arp_packet = MutableArpPacket::new(&mut buffer[..]).unwrap();
        arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp_packet.set_protocol_type(EtherTypes::Ipv4);
        arp_packet.set_hw_addr_len(6);
        arp_packet.set_proto_addr_len(4);
        arp_packet.set_operation(ArpOperations::Request);
        arp_packet.set_sender_hw_addr(sender_mac.parse::<MacAddr>().unwrap());
        arp_packet.set_sender_proto_addr(sender_ip.parse::<Ipv4Addr>().unwrap());
        arp_packet.set_target_hw_addr(MacAddr::zero());
        arp_packet.set_target_proto_addr(Ipv4Addr::new(192, 0, 2, 254));

        Self::ethernet(src_mac, "ff:ff:ff:ff:ff:ff", EtherTypes::Arp, &buffer)
    }

    /// IPv4 packet; `options` must be a multiple of 4 bytes long
    pub fn ipv4(
        src_mac: &str,
        dst_mac: &str,
        src_ip: &str,
        dst_ip: &str,
        protocol: IpNextHeaderProtocol,
        options: &[u8],
        payload: &[u8],
    ) -> Vec<u8> {
        let header_len = 20 + options.len();
        let mut buffer = vec![0u8; header_len + payload.len()];
        buffer[20..header_len].copy_from_slice(options);
        buffer[header_len..].copy_from_slice(payload);

        let mut ip_packet = MutableIpv4Packet::new(&mut buffer[..]).unwrap();
        ip_packet.set_version(4);
        ip_packet.set_header_length((header_len / 4) as u8);
        ip_packet.set_total_length((header_len + payload.len()) as u16);
        ip_packet.set_ttl(64);
        ip_packet.set_next_level_protocol(protocol);
        ip_packet.set_source(src_ip.parse::<Ipv4Addr>().unwrap());
        ip_packet.set_destination(dst_ip.parse::<Ipv4Addr>().unwrap());
        let checksum = checksum(&ip_packet.to_immutable());
        ip_packet.set_checksum(checksum);

        Self::ethernet(src_mac, dst_mac, EtherTypes::Ipv4, &buffer)
    }

    /// IPv6 packet with the given next header and payload
    pub fn ipv6(
        src_mac: &str,
        dst_mac: &str,
        src_ip: &str,
        dst_ip: &str,
        next_header: IpNextHeaderProtocol,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut buffer = vec![0u8; 40 + payload.len()];

        let mut ip_packet = MutableIpv6Packet::new(&mut buffer[..]).unwrap();
        ip_packet.set_version(6);
        ip_packet.set_payload_length(payload.len() as u16);
        ip_packet.set_next_header(next_header);
        ip_packet.set_hop_limit(255);
        ip_packet.set_source(src_ip.parse::<Ipv6Addr>().unwrap());
        ip_packet.set_destination(dst_ip.parse::<Ipv6Addr>().unwrap());
        ip_packet.set_payload(payload);

        Self::ethernet(src_mac, dst_mac, EtherTypes::Ipv6, &buffer)
    }

    fn udp(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
        let mut buffer = vec![0u8; 8 + payload.len()];

        let mut udp_packet = MutableUdpPacket::new(&mut buffer[..]).unwrap();
        udp_packet.set_source(src_port);
        udp_packet.set_destination(dst_port);
        udp_packet.set_length((8 + payload.len()) as u16);
        udp_packet.set_payload(payload);

        buffer
    }

    pub fn ipv4_udp(
        src_mac: &str,
        dst_mac: &str,
        src_ip: &str,
        dst_ip: &str,
        src_port: u16,
        dst_port: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let udp = Self::udp(src_port, dst_port, payload);
        Self::ipv4(
            src_mac,
            dst_mac,
            src_ip,
            dst_ip,
            IpNextHeaderProtocols::Udp,
            &[],
            &udp,
        )
    }

    pub fn ipv6_udp(
        src_mac: &str,
        dst_mac: &str,
        src_ip: &str,
        dst_ip: &str,
        src_port: u16,
        dst_port: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let udp = Self::udp(src_port, dst_port, payload);
        Self::ipv6(src_mac, dst_mac, src_ip, dst_ip, IpNextHeaderProtocols::Udp, &udp)
    }

    /// IGMP message carried with the Router Alert option, as hosts send it
    pub fn igmp(src_mac: &str, src_ip: &str, dst_ip: &str, message: &[u8]) -> Vec<u8> {
        Self::ipv4(
            src_mac,
            "01:00:5e:00:00:16",
            src_ip,
            dst_ip,
            IpNextHeaderProtocols::Igmp,
            &[0x94, 0x04, 0x00, 0x00],
            message,
        )
    }

    /// ICMPv6 message, optionally behind a hop-by-hop header with Router Alert
    pub fn icmpv6(
        src_mac: &str,
        dst_mac: &str,
        src_ip: &str,
        dst_ip: &str,
        message: &[u8],
        hop_by_hop: bool,
    ) -> Vec<u8> {
        if !hop_by_hop {
            return Self::ipv6(
                src_mac,
                dst_mac,
                src_ip,
                dst_ip,
                IpNextHeaderProtocols::Icmpv6,
                message,
            );
        }
        let mut payload = vec![58, 0, 0x05, 0x02, 0x00, 0x00, 0x01, 0x00];
        payload.extend_from_slice(message);
        Self::ipv6(
            src_mac,
            dst_mac,
            src_ip,
            dst_ip,
            IpNextHeaderProtocols::Hopopt,
            &payload,
        )
    }

    /// Router advertisement carrying one Prefix Information option per prefix
    pub fn router_advertisement(
        src_mac: &str,
        src_ip: &str,
        prefixes: &[(&str, u8)],
    ) -> Vec<u8> {
        let mut message = vec![134, 0, 0, 0, 64, 0, 0x07, 0x08];
        message.extend_from_slice(&[0u8; 8]);
        for (prefix, len) in prefixes {
            message.extend_from_slice(&[3, 4, *len, 0xc0]);
            message.extend_from_slice(&[0u8; 12]);
            message.extend_from_slice(&prefix.parse::<Ipv6Addr>().unwrap().octets());
        }
        Self::icmpv6(src_mac, "33:33:00:00:00:01", src_ip, "ff02::1", &message, false)
    }

    /// BOOTP message with the DHCP magic cookie; `op` 1 is a request, 2 a reply
    pub fn dhcpv4(src_mac: &str, op: u8) -> Vec<u8> {
        let mut message = vec![0u8; 240];
        message[0] = op;
        message[236..240].copy_from_slice(&[0x63, 0x82, 0x53, 0x63]);
        let (src_port, dst_port) = if op == 2 { (67, 68) } else { (68, 67) };
        Self::ipv4_udp(
            src_mac,
            "ff:ff:ff:ff:ff:ff",
            "192.0.2.1",
            "255.255.255.255",
            src_port,
            dst_port,
            &message,
        )
    }

    /// Configuration BPDU in an 802.3 LLC frame
    pub fn stp(src_mac: &str) -> Vec<u8> {
        let mut payload = vec![0x42, 0x42, 0x03];
        payload.extend_from_slice(&[0u8; 35]);
        Self::ethernet(
            src_mac,
            "01:80:c2:00:00:00",
            EtherType(payload.len() as u16),
            &payload,
        )
    }

    /// HomePlug frame with the given EtherType (0x88e1 or 0x8912)
    pub fn plc(src_mac: &str, ether_type: u16) -> Vec<u8> {
        Self::ethernet(src_mac, "00:b0:52:00:00:01", EtherType(ether_type), &[0u8; 46])
    }
}

/// Decodes a frame built by [`FrameBuilder`], without a capture timestamp
pub fn decode(frame: &[u8]) -> DecodedPacket {
    DecodedPacket::from_bytes(frame, None).unwrap()
}

/// Generate a synthetic pcap file for testing
pub fn create_test_pcap(packets: &[Vec<u8>]) -> std::io::Result<tempfile::NamedTempFile> {
    create_test_pcap_with_link_type(packets, pcap_file::DataLink::ETHERNET)
}

pub fn create_test_pcap_with_link_type(
    packets: &[Vec<u8>],
    datalink: pcap_file::DataLink,
) -> std::io::Result<tempfile::NamedTempFile> {
    use pcap_file::pcap::{PcapHeader, PcapPacket, PcapWriter};

    let temp_file = tempfile::NamedTempFile::new()?;
    let file = temp_file.reopen()?;

    let mut pcap_writer = PcapWriter::with_header(
        file,
        PcapHeader {
            datalink,
            ..Default::default()
        },
    )
    .map_err(|e| std::io::Error::other(format!("Pcap write error: {}", e)))?;

    for (i, packet_data) in packets.iter().enumerate() {
        let packet = PcapPacket {
            timestamp: std::time::Duration::from_secs(1700000000 + i as u64),
            orig_len: packet_data.len() as u32,
            data: std::borrow::Cow::Borrowed(packet_data),
        };
        pcap_writer
            .write_packet(&packet)
            .map_err(|e| std::io::Error::other(format!("Packet write error: {}", e)))?;
    }

    Ok(temp_file)
}

mod tests {
    use super::*;

    #[test]
    fn test_ipv4_frame_creation() {
        let frame = FrameBuilder::ipv4_udp(
            "00:11:22:33:44:55",
            "aa:bb:cc:dd:ee:ff",
            "192.168.1.100",
            "8.8.8.8",
            54321,
            53,
            b"udp_data",
        );

        let eth = EthernetPacket::new(&frame).unwrap();
        assert_eq!(eth.get_source().to_string(), "00:11:22:33:44:55");
        assert_eq!(eth.get_destination().to_string(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(frame.len(), 14 + 20 + 8 + 8);
    }

    #[test]
    fn test_vlan_tag_insertion() {
        let frame = FrameBuilder::plc("00:11:22:33:44:55", 0x88e1);
        let tagged = FrameBuilder::vlan_tagged(&frame, 42);

        assert_eq!(tagged.len(), frame.len() + 4);
        assert_eq!(tagged[12..18], [0x81, 0x00, 0x00, 42, 0x88, 0xe1]);
    }

    #[test]
    fn test_pcap_creation() {
        let packets = vec![
            FrameBuilder::stp("00:11:22:33:44:55"),
            FrameBuilder::arp("00:11:22:33:44:55", "00:11:22:33:44:55", "192.168.1.100"),
        ];

        let pcap_file = create_test_pcap(&packets).unwrap();
        assert!(pcap_file.path().exists());
    }
}
