use super::types::{UsageVector, TOUR_LENGTH};

// Segment pairs that must be selected together for the four chosen segments
// to close a loop through all four cities.
pub const PAIRED_SEGMENTS: [(usize, usize); 3] = [(0, 2), (1, 3), (4, 5)];

#[inline]
pub fn hamming_weight(usage: &[bool]) -> usize {
    usage.iter().filter(|&&used| used).count()
}

/// True if `usage` describes a closed 4-city tour.
pub fn is_valid_tour(usage: &UsageVector) -> bool {
    if hamming_weight(usage) != TOUR_LENGTH {
        return false;
    }
    PAIRED_SEGMENTS.iter().all(|&(a, b)| usage[a] == usage[b])
}

/// Number of broken constraints: distance from weight 4 plus failed pairings.
/// Zero exactly when `is_valid_tour` holds.
pub fn constraint_violations(usage: &UsageVector) -> usize {
    let weight_gap = hamming_weight(usage).abs_diff(TOUR_LENGTH);
    let broken_pairs = PAIRED_SEGMENTS
        .iter()
        .filter(|&&(a, b)| usage[a] != usage[b])
        .count();
    weight_gap + broken_pairs
}
