use std::fmt;

use chrono::{DateTime, Utc};

use super::time_info::{TimeInfo, Timestamped};

/// A named role a device was seen performing (bridge, router, ...)
#[derive(Debug, Clone)]
pub struct PropInfo {
    time: TimeInfo,
    name: &'static str,
    enabled: bool,
}

impl PropInfo {
    pub fn new(name: &'static str) -> Self {
        Self {
            time: TimeInfo::default(),
            name,
            enabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marks the property as enabled and records when it was last observed
    pub fn enable(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.enabled = true;
        self.time.set_timestamp(timestamp);
    }

    #[allow(dead_code)]
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Timestamped for PropInfo {
    fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    fn time_info_mut(&mut self) -> &mut TimeInfo {
        &mut self.time
    }
}

impl fmt::Display for PropInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 42usize.saturating_sub(self.name.len());
        write!(
            f,
            "{}: {:<width$} (age: {:.0})",
            self.name,
            self.enabled,
            self.age(),
            width = width
        )
    }
}
