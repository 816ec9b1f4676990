//! Pass 1: exact per-label row counts over the whole input.

mod counter;

pub use counter::{LabelAccountant, LabelTally};

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Label (literal, un-normalized) to occurrence count.
/// Iterates in first-seen order; [`LabelCountMap::sorted_desc`] is a stable sort over it,
/// so tied counts rank by first appearance in the file, not by per-chunk frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCountMap {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl LabelCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, n: u64) {
        match self.counts.get_mut(label) {
            Some(c) => *c += n,
            None => {
                self.order.push(label.to_string());
                self.counts.insert(label.to_string(), n);
            }
        }
    }

    /// Fold another tally in, keeping this map's first-seen order.
    pub fn merge(&mut self, other: LabelCountMap) {
        for label in other.order {
            let n = other.counts.get(&label).copied().unwrap_or(0);
            self.add(&label, n);
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.counts.get(label).copied()
    }

    pub fn count(&self, label: &str) -> u64 {
        self.get(label).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(|l| (l.as_str(), self.counts.get(l).copied().unwrap_or(0)))
    }

    /// Descending by count; ties keep first-seen order.
    pub fn sorted_desc(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for LabelCountMap {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut map = LabelCountMap::new();
        for (label, n) in iter {
            map.add(label.as_ref(), n);
        }
        map
    }
}

/// Serializes as a JSON object ordered by descending count.
impl Serialize for LabelCountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.sorted_desc();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (label, n) in entries {
            map.serialize_entry(label, &n)?;
        }
        map.end()
    }
}
