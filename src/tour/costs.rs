use crate::error::{QtspError, QtspResult};

/// Total cost of the segments flagged in `usage`.
///
/// Works for any length as long as both slices agree; a mismatch is an error
/// rather than a silent truncation.
pub fn journey_cost(segment_costs: &[f64], usage: &[bool]) -> QtspResult<f64> {
    if segment_costs.len() != usage.len() {
        return Err(QtspError::LengthMismatch {
            costs: segment_costs.len(),
            usage: usage.len(),
        });
    }

    Ok(segment_costs
        .iter()
        .zip(usage)
        .filter(|(_, used)| **used)
        .fold(0.0, |acc, (cost, _)| acc + cost))
}
