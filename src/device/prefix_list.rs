use std::fmt;
use std::net::Ipv6Addr;

use super::time_info::{TimeInfo, Timestamped};

/// A prefix advertised by a router.
///
/// `option` is the body of an ICMPv6 Prefix Information option as received:
/// byte 0 is the prefix length and bytes 14..30 hold the prefix.
#[derive(Debug, Clone)]
pub struct PrefixInfo {
    time: TimeInfo,
    pub option: Vec<u8>,
}

impl PrefixInfo {
    pub fn prefix_len(&self) -> Option<u8> {
        self.option.first().copied()
    }

    pub fn prefix(&self) -> Option<Ipv6Addr> {
        let bytes: [u8; 16] = self.option.get(14..30)?.try_into().ok()?;
        Some(Ipv6Addr::from(bytes))
    }

    /// `prefix/len` notation
    pub fn cidr(&self) -> String {
        match (self.prefix(), self.prefix_len()) {
            (Some(prefix), Some(len)) => format!("{}/{}", prefix, len),
            _ => "invalid".to_string(),
        }
    }
}

impl Timestamped for PrefixInfo {
    fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    fn time_info_mut(&mut self) -> &mut TimeInfo {
        &mut self.time
    }
}

impl fmt::Display for PrefixInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix: {:<34} (age: {:.0})", self.cidr(), self.age())
    }
}

/// Prefixes from the most recent router advertisement, in advertised order
#[derive(Debug, Clone, Default)]
pub struct PrefixList {
    prefixes: Vec<PrefixInfo>,
}

impl PrefixList {
    pub fn clear(&mut self) {
        self.prefixes.clear();
    }

    /// Appends a prefix; duplicates are kept
    pub fn add(&mut self, option: Vec<u8>) -> &mut PrefixInfo {
        self.prefixes.push(PrefixInfo {
            time: TimeInfo::default(),
            option,
        });
        let last = self.prefixes.len() - 1;
        &mut self.prefixes[last]
    }

    pub fn get(&self) -> &[PrefixInfo] {
        &self.prefixes
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl fmt::Display for PrefixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prefix in &self.prefixes {
            writeln!(f, "      {}", prefix)?;
        }
        Ok(())
    }
}
