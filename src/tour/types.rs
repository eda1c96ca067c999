use crate::error::{QtspError, QtspResult};
use serde::{Deserialize, Serialize};

/// Candidate journey segments in the 4-city topology.
pub const SEGMENT_COUNT: usize = 6;

/// Segments a closed 4-city tour uses.
pub const TOUR_LENGTH: usize = 4;

/// Reference weights used by the `default` command.
pub const DEFAULT_SEGMENT_COSTS: [f64; SEGMENT_COUNT] = [4.70, 9.09, 9.03, 5.70, 8.02, 1.71];

/// One oracle sample: `usage[i]` says whether segment `i` is on the tour.
pub type UsageVector = [bool; SEGMENT_COUNT];

/// Bit-packed `UsageVector`, index 0 in the most significant position.
pub type CanonicalKey = u32;

/// Per-segment costs for one run. Only constructible with exactly six entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCosts([f64; SEGMENT_COUNT]);

impl SegmentCosts {
    pub fn new(costs: &[f64]) -> QtspResult<Self> {
        let arr: [f64; SEGMENT_COUNT] = costs.try_into().map_err(|_| QtspError::InvalidInputLength {
            expected: SEGMENT_COUNT,
            found: costs.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for SegmentCosts {
    fn default() -> Self {
        Self(DEFAULT_SEGMENT_COSTS)
    }
}

/// Parses a pattern such as `101011` (index 0 first).
pub fn parse_pattern(s: &str) -> QtspResult<UsageVector> {
    let s = s.trim();
    if s.len() != SEGMENT_COUNT {
        return Err(QtspError::MalformedPattern(format!(
            "'{}' must have exactly {} digits",
            s, SEGMENT_COUNT
        )));
    }

    let mut usage = [false; SEGMENT_COUNT];
    for (i, c) in s.chars().enumerate() {
        usage[i] = match c {
            '1' => true,
            '0' => false,
            other => {
                return Err(QtspError::MalformedPattern(format!(
                    "'{}' contains '{}', only 0 and 1 are allowed",
                    s, other
                )))
            }
        };
    }
    Ok(usage)
}
