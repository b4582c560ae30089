//! Packet capture. Opens a live device or a pcap file, decodes every Ethernet
//! frame and applies it to the device table.

use chrono::{DateTime, Utc};
use pcap::{Activated, Capture, Device, Linktype, PacketHeader};
use tracing::{debug, info, trace};

use crate::config::CaptureSource;
use crate::device::DeviceTable;
use crate::error::Error;
use crate::packet::DecodedPacket;
use crate::parser::Parser;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStats {
    pub packets: u64,
    /// Frames too short to hold an Ethernet header
    pub skipped: u64,
}

/// Opens the capture source and applies `filter` to it
pub fn open(source: &CaptureSource, filter: Option<&str>) -> Result<Capture<dyn Activated>, Error> {
    let mut cap: Capture<dyn Activated> = match source {
        CaptureSource::Live {
            interface,
            promisc,
            snaplen,
            timeout,
        } => {
            let device = match interface {
                Some(name) => Device::from(name.as_str()),
                None => Device::list()?.into_iter().next().ok_or(Error::NoDevice)?,
            };
            info!("Capturing on device: {}", device.name);
            let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
            Capture::from_device(device)?
                .promisc(*promisc)
                .snaplen(*snaplen)
                .timeout(timeout_ms)
                .open()?
                .into()
        }
        CaptureSource::File(path) => {
            info!("Reading pcap file: {}", path.display());
            Capture::from_file(path)?.into()
        }
    };

    if let Some(expr) = filter {
        debug!("Applying capture filter: {}", expr);
        cap.filter(expr, true)?;
    }

    let link_type = cap.get_datalink();
    if link_type != Linktype::ETHERNET {
        return Err(Error::LinkType(link_type.0));
    }
    Ok(cap)
}

/// Reads packets until the source is exhausted. Live captures only return on
/// error.
pub fn run(
    cap: &mut Capture<dyn Activated>,
    table: &DeviceTable,
    parser: &Parser,
) -> Result<CaptureStats, Error> {
    let mut stats = CaptureStats::default();
    loop {
        let packet = match cap.next_packet() {
            Ok(packet) => packet,
            Err(pcap::Error::TimeoutExpired) => continue,
            Err(pcap::Error::NoMorePackets) => break,
            Err(e) => return Err(e.into()),
        };

        match DecodedPacket::from_bytes(packet.data, timestamp(packet.header)) {
            Some(decoded) => {
                table.process(parser, &decoded);
                stats.packets += 1;
            }
            None => {
                trace!("Skipping {} byte frame", packet.data.len());
                stats.skipped += 1;
            }
        }
    }
    info!(
        "Capture finished: {} packets, {} skipped",
        stats.packets, stats.skipped
    );
    Ok(stats)
}

fn timestamp(header: &PacketHeader) -> Option<DateTime<Utc>> {
    let micros = u32::try_from(header.ts.tv_usec).ok()?;
    DateTime::from_timestamp(header.ts.tv_sec as i64, micros.checked_mul(1000)?)
}
