use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::time_info::{TimeInfo, Timestamped};

/// Virtual network segment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VNetKind {
    Vlan,
    Vxlan,
    Geneve,
}

impl VNetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VNetKind::Vlan => "VLAN",
            VNetKind::Vxlan => "VXLAN",
            VNetKind::Geneve => "GENEVE",
        }
    }
}

impl fmt::Display for VNetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A VLAN tag or VXLAN/Geneve VNI a device sent traffic on
#[derive(Debug, Clone)]
pub struct VNetInfo {
    time: TimeInfo,
    pub kind: VNetKind,
    pub id: u32,
    pub packets: u64,
}

impl Timestamped for VNetInfo {
    fn time_info(&self) -> &TimeInfo {
        &self.time
    }

    fn time_info_mut(&mut self) -> &mut TimeInfo {
        &mut self.time
    }
}

impl fmt::Display for VNetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 42usize.saturating_sub(self.kind.as_str().len());
        write!(
            f,
            "{}: {:<width$} (age: {:.0}, pkts: {})",
            self.kind,
            self.id,
            self.age(),
            self.packets,
            width = width
        )
    }
}

/// Virtual networks of one kind, keyed by ID
#[derive(Debug, Clone)]
pub struct VNetMap {
    kind: VNetKind,
    entries: BTreeMap<u32, VNetInfo>,
}

impl VNetMap {
    pub fn new(kind: VNetKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> VNetKind {
        self.kind
    }

    /// Returns the entry for `id`, creating an empty one first if needed
    pub fn add(&mut self, id: u32) -> &mut VNetInfo {
        let kind = self.kind;
        self.entries.entry(id).or_insert_with(|| {
            debug!("Adding new {} entry {}", kind, id);
            VNetInfo {
                time: TimeInfo::default(),
                kind,
                id,
                packets: 0,
            }
        })
    }

    #[allow(dead_code)]
    pub fn get(&self, id: u32) -> Option<&VNetInfo> {
        self.entries.get(&id)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VNetInfo> {
        self.entries.values()
    }
}

impl fmt::Display for VNetMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vnet in self.entries.values() {
            writeln!(f, "    {}", vnet)?;
        }
        Ok(())
    }
}
