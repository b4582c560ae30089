//! JSON view of the device table for the `/api/*` HTTP endpoints.

use actix_web::web::{Data, Query};
use actix_web::{HttpResponse, Responder, get};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::{AddrMap, DeviceInfo, DeviceMap, DeviceTable, Timestamped, VNetMap};

use super::FlushQuery;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DevicesResponse {
    pub packets: u64,
    pub devices: Vec<DeviceEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeviceEntry {
    pub mac: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub packets: u64,
    pub properties: Vec<PropertyEntry>,
    pub prefixes: Vec<PropertyEntry>,
    pub vnets: Vec<VNetEntry>,
    pub unicast: Vec<AddressEntry>,
    pub multicast: Vec<AddressEntry>,
    pub mac_peers: Vec<AddressEntry>,
    pub ip_peers: Vec<AddressEntry>,
}

/// An enabled role, or an advertised prefix in CIDR form
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PropertyEntry {
    pub name: String,
    pub last_seen: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VNetEntry {
    pub kind: String,
    pub id: u32,
    pub last_seen: Option<DateTime<Utc>>,
    pub packets: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AddressEntry {
    pub addr: String,
    pub last_seen: Option<DateTime<Utc>>,
    pub packets: u64,
}

impl From<&DeviceMap> for DevicesResponse {
    fn from(devices: &DeviceMap) -> Self {
        DevicesResponse {
            packets: devices.packets,
            devices: devices.iter().map(DeviceEntry::from).collect(),
        }
    }
}

impl From<&DeviceInfo> for DeviceEntry {
    fn from(device: &DeviceInfo) -> Self {
        let properties = [
            &device.bridge,
            &device.dhcp,
            &device.router,
            &device.powerline,
        ]
        .into_iter()
        .filter(|prop| prop.is_enabled())
        .map(|prop| PropertyEntry {
            name: prop.name().to_string(),
            last_seen: prop.time_info().timestamp(),
        })
        .collect();

        let prefixes = device
            .prefixes
            .get()
            .iter()
            .map(|prefix| PropertyEntry {
                name: prefix.cidr(),
                last_seen: prefix.time_info().timestamp(),
            })
            .collect();

        let vnets = [&device.vlans, &device.vxlans, &device.geneves]
            .into_iter()
            .flat_map(vnet_entries)
            .collect();

        DeviceEntry {
            mac: device.mac.to_string(),
            last_seen: device.time_info().timestamp(),
            packets: device.packets,
            properties,
            prefixes,
            vnets,
            unicast: address_entries(&device.ucasts),
            multicast: address_entries(&device.mcasts),
            mac_peers: address_entries(&device.mac_peers),
            ip_peers: address_entries(&device.ip_peers),
        }
    }
}

fn vnet_entries(vnets: &VNetMap) -> impl Iterator<Item = VNetEntry> + '_ {
    let kind = vnets.kind().to_string();
    vnets.iter().map(move |vnet| VNetEntry {
        kind: kind.clone(),
        id: vnet.id,
        last_seen: vnet.time_info().timestamp(),
        packets: vnet.packets,
    })
}

fn address_entries(addrs: &AddrMap) -> Vec<AddressEntry> {
    addrs
        .iter()
        .map(|info| AddressEntry {
            addr: info.addr.to_string(),
            last_seen: info.time_info().timestamp(),
            packets: info.packets,
        })
        .collect()
}

#[get("/api/devices")]
pub(super) async fn get_devices(
    table: Data<DeviceTable>,
    query: Query<FlushQuery>,
) -> impl Responder {
    let response = table.read_and_flush(query.flush(), |devices| DevicesResponse::from(devices));
    HttpResponse::Ok().json(response)
}
