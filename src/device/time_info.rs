use chrono::{DateTime, Utc};

/// Last time something was seen on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeInfo {
    timestamp: Option<DateTime<Utc>>,
}

impl TimeInfo {
    /// Passing `None` marks the entry as never seen.
    pub fn set_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.timestamp = timestamp;
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Seconds since the timestamp, or -1 if it was never set
    pub fn age(&self) -> f64 {
        self.age_at(Utc::now())
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> f64 {
        match self.timestamp {
            Some(timestamp) => (now - timestamp).num_milliseconds() as f64 / 1000.0,
            None => -1.0,
        }
    }
}

/// Anything in the device table that carries a [`TimeInfo`].
pub trait Timestamped {
    fn time_info(&self) -> &TimeInfo;

    fn time_info_mut(&mut self) -> &mut TimeInfo;

    fn age(&self) -> f64 {
        self.time_info().age()
    }

    fn set_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.time_info_mut().set_timestamp(timestamp);
    }
}
