//! The terminal artifact of a run: an ordered, deduplicated list of
//! dependency records.

use crate::coordinate::DependencyRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Dependency manifest, unique and ascending by dedup key.
///
/// The only way to build one is from an iterator of records, which sorts and
/// deduplicates; there is no way to mutate it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    records: Vec<DependencyRecord>,
}

impl Manifest {
    /// Records in ascending dedup-key order.
    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DependencyRecord> {
        self.records.iter()
    }
}

impl FromIterator<DependencyRecord> for Manifest {
    fn from_iter<I: IntoIterator<Item = DependencyRecord>>(iter: I) -> Self {
        // Later records replace earlier ones with the same key.
        let keyed: BTreeMap<String, DependencyRecord> = iter
            .into_iter()
            .map(|record| (record.dedup_key(), record))
            .collect();
        Self {
            records: keyed.into_values().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a DependencyRecord;
    type IntoIter = std::slice::Iter<'a, DependencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
