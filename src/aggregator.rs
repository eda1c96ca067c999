use crate::tour::{key_to_binary, to_key, CanonicalKey, UsageVector, SEGMENT_COUNT};
use serde::Serialize;
use std::collections::HashMap;

/// Everything known about one distinct oracle outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedRecord {
    pub key: CanonicalKey,
    pub count: usize,
    pub cost: f64,
    pub valid: bool,
}

impl AggregatedRecord {
    pub fn cycle(&self) -> String {
        key_to_binary(self.key, SEGMENT_COUNT)
    }
}

/// Frequency table over oracle samples for a single run.
///
/// Cost and validity are fixed when a key is first seen. The best-valid
/// reference is only reconsidered on first insertion of a key, so among
/// equally cheap valid tours the one observed first is kept.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: HashMap<CanonicalKey, AggregatedRecord>,
    best_valid: Option<CanonicalKey>,
    observations: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, usage: &UsageVector, cost: f64, valid: bool) {
        let key = to_key(usage);
        self.observations += 1;

        if let Some(record) = self.records.get_mut(&key) {
            record.count += 1;
            return;
        }

        self.records.insert(
            key,
            AggregatedRecord {
                key,
                count: 1,
                cost,
                valid,
            },
        );

        if valid {
            let improves = match self.best() {
                None => true,
                Some(best) => cost < best.cost,
            };
            if improves {
                self.best_valid = Some(key);
            }
        }
    }

    pub fn best(&self) -> Option<&AggregatedRecord> {
        self.best_valid.and_then(|k| self.records.get(&k))
    }

    pub fn get(&self, key: CanonicalKey) -> Option<&AggregatedRecord> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all counts; equals the number of `observe` calls.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Best valid record plus all records, most frequent first (key ascending on ties).
    pub fn snapshot(&self) -> (Option<AggregatedRecord>, Vec<AggregatedRecord>) {
        let mut all: Vec<AggregatedRecord> = self.records.values().copied().collect();
        all.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
        (self.best().copied(), all)
    }
}
