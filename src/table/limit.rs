use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entry::TokenEntry;

/// Pruning passes for [`TokenTable::limit`](super::TokenTable::limit).
///
/// Both passes are optional. When both are set, the occurrence filter runs
/// first and the size cap is applied to what survives it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitOptions {
    /// Keep at most this many entries, the most frequent first.
    pub max_size: Option<usize>,
    /// Drop entries seen fewer than this many times.
    pub occurrence: Option<u64>,
}

impl LimitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn occurrence(mut self, occurrence: u64) -> Self {
        self.occurrence = Some(occurrence);
        self
    }
}

pub(crate) fn prune(entries: &mut IndexMap<String, TokenEntry>, options: LimitOptions) {
    if let Some(occurrence) = options.occurrence {
        entries.retain(|_, entry| entry.count >= occurrence);
    }

    if let Some(max_size) = options.max_size {
        // IndexMap::sort_by is stable: equal counts keep their current order.
        entries.sort_by(|_, a, _, b| b.count.cmp(&a.count));
        entries.truncate(max_size);
    }
}
