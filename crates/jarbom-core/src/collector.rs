//! Accumulates resolved coordinates for one run.

use std::collections::BTreeMap;

use jarbom_schema::{Coordinate, DependencyRecord, Manifest};

/// Deduplicating, key-ordered store of dependency records.
///
/// Owned by the run that fills it; [`flush`](Self::flush) consumes it.
#[derive(Debug, Default)]
pub struct DependencyCollector {
    entries: BTreeMap<String, DependencyRecord>,
}

impl DependencyCollector {
    /// An empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `coordinate` under `managementKey:version`, replacing any
    /// previous record with the same key. Returns `true` if the key is new.
    pub fn add(&mut self, coordinate: Coordinate) -> bool {
        let record = DependencyRecord::new(coordinate);
        self.entries.insert(record.dedup_key(), record).is_none()
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records, ascending by dedup key.
    pub fn flush(self) -> Manifest {
        self.entries.into_values().collect()
    }
}
