//! The device table and the entries it is built from.
//!
//! Every entry carries a last-seen timestamp and most carry a packet
//! count. Collections are keyed and sorted so that rendering is stable.

mod addr_map;
mod device_info;
mod device_map;
mod endpoint;
mod prefix_list;
mod prop_info;
mod table;
mod time_info;
mod vnet_map;

pub use addr_map::AddrMap;
pub use device_info::DeviceInfo;
pub use device_map::DeviceMap;
pub use endpoint::Endpoint;
pub use table::DeviceTable;
pub use time_info::Timestamped;
pub use vnet_map::VNetMap;
