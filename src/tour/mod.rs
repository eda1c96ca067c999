pub mod costs;
pub mod key;
pub mod types;
pub mod validity;

pub use self::costs::journey_cost;
pub use self::key::{from_key, key_to_binary, to_key};
pub use self::types::{
    parse_pattern, CanonicalKey, SegmentCosts, UsageVector, DEFAULT_SEGMENT_COSTS, SEGMENT_COUNT,
};
pub use self::validity::{constraint_violations, is_valid_tour};

use serde::Serialize;

/// Cheapest valid tour found by exhaustive enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExactOptimum {
    pub key: CanonicalKey,
    pub cost: f64,
}

const PATTERN_COUNT: CanonicalKey = 1 << SEGMENT_COUNT;

/// Every valid tour pattern, in ascending key order.
pub fn valid_tours() -> Vec<UsageVector> {
    (0..PATTERN_COUNT)
        .map(from_key)
        .filter(is_valid_tour)
        .collect()
}

/// Brute force over all 64 patterns. On equal cost the lower key wins.
pub fn exact_optimum(costs: &SegmentCosts) -> Option<ExactOptimum> {
    let mut best: Option<ExactOptimum> = None;
    for usage in valid_tours() {
        // Both sides are six long, so this cannot fail.
        let cost = journey_cost(costs.as_slice(), &usage).ok()?;
        if best.map_or(true, |b| cost < b.cost) {
            best = Some(ExactOptimum {
                key: to_key(&usage),
                cost,
            });
        }
    }
    best
}
