//! Origin-destination travel demand.

use rustc_hash::FxHashMap;

use ta_core::NodeId;

/// One OD pair with its demand volume.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandEntry {
    pub origin:      NodeId,
    pub destination: NodeId,
    pub volume:      f64,
}

/// A demand matrix: at most one entry per ordered `(origin, destination)`
/// pair, held in sorted pair order.
///
/// Construction merges duplicate pairs additively.  Entries with volume <= 0
/// are dropped at construction — zero or negative demand is a no-op, not an
/// error.  The sorted order makes assignment iteration (and therefore skip
/// lists and parallel-merge order) deterministic regardless of input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandMatrix {
    entries: Vec<DemandEntry>,
}

impl DemandMatrix {
    /// Build from `(origin, destination, volume)` triples.
    pub fn from_entries(entries: impl IntoIterator<Item = (NodeId, NodeId, f64)>) -> Self {
        let mut merged: FxHashMap<(NodeId, NodeId), f64> = FxHashMap::default();
        for (origin, destination, volume) in entries {
            *merged.entry((origin, destination)).or_insert(0.0) += volume;
        }

        let mut entries: Vec<DemandEntry> = merged
            .into_iter()
            .filter(|&(_, volume)| volume > 0.0)
            .map(|((origin, destination), volume)| DemandEntry { origin, destination, volume })
            .collect();
        entries.sort_by_key(|e| (e.origin, e.destination));

        Self { entries }
    }

    /// Entries in `(origin, destination)` order.
    pub fn iter(&self) -> impl Iterator<Item = &DemandEntry> {
        self.entries.iter()
    }

    /// Raw entry slice, in `(origin, destination)` order.
    pub fn entries(&self) -> &[DemandEntry] {
        &self.entries
    }

    /// A copy with every volume multiplied by `factor` — the per-step demand
    /// of incremental assignment is `scaled(1.0 / k)`.
    pub fn scaled(&self, factor: f64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| DemandEntry { volume: e.volume * factor, ..*e })
            .collect();
        Self { entries }
    }

    /// Sum of all demand volumes.
    pub fn total_volume(&self) -> f64 {
        self.entries.iter().map(|e| e.volume).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
