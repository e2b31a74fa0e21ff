//! Frequency histograms over violation counts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps a violation count to how many repetitions produced it.
///
/// Absent keys have frequency 0. Keys are kept sorted so that serialized
/// output and equality checks do not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<u64, u64>,
}

/// Mean, minimum and maximum of the recorded values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`
    pub fn record_occurrence(&mut self, key: u64) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Frequency of `key`, 0 if never recorded
    pub fn get(&self, key: u64) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all frequencies, i.e. the number of recorded occurrences
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    pub fn summary(&self) -> Option<HistogramSummary> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self.iter().map(|(k, v)| k as f64 * v as f64).sum();
        Some(HistogramSummary {
            mean: weighted / total as f64,
            min: *self.counts.keys().next()?,
            max: *self.counts.keys().next_back()?,
        })
    }
}

impl FromIterator<u64> for Histogram {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut histogram = Histogram::new();
        for key in iter {
            histogram.record_occurrence(key);
        }
        histogram
    }
}

#[cfg(test)]
#[path = "histogram_tests.rs"]
mod histogram_tests;
