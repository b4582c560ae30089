use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::packet::DecodedPacket;
use crate::parser::Parser;

use super::device_map::DeviceMap;

/// Shared handle to the device table.
///
/// Every clone refers to the same `DeviceMap`. The capture loop writes through
/// [`DeviceTable::process`]; reporters read through [`DeviceTable::render`].
/// Both hold the lock for the whole operation.
#[derive(Debug, Clone, Default)]
pub struct DeviceTable {
    inner: Arc<Mutex<DeviceMap>>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the table. A writer that panicked mid-packet leaves the table
    /// usable, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, DeviceMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one packet to the table in a single critical section
    pub fn process(&self, parser: &Parser, packet: &DecodedPacket) {
        let mut devices = self.lock();
        parser.parse(&mut devices, packet);
    }

    pub fn render(&self) -> String {
        self.lock().to_string()
    }

    /// Renders the table, then resets it if `flush` is set. Nothing can be
    /// processed between the two steps.
    pub fn render_and_flush(&self, flush: bool) -> String {
        self.read_and_flush(flush, |devices| devices.to_string())
    }

    /// Like [`DeviceTable::render_and_flush`] with a caller-supplied reader
    pub fn read_and_flush<T>(&self, flush: bool, read: impl FnOnce(&DeviceMap) -> T) -> T {
        let mut devices = self.lock();
        let value = read(&devices);
        if flush {
            devices.reset();
        }
        value
    }
}
