use super::{Oracle, OracleError, OracleParams};
use crate::tour::{SegmentCosts, UsageVector};

/// Always answers with the same pattern.
#[derive(Debug, Clone, Copy)]
pub struct FixedOracle {
    pattern: UsageVector,
}

impl FixedOracle {
    pub fn new(pattern: UsageVector) -> Self {
        Self { pattern }
    }
}

impl Oracle for FixedOracle {
    fn sample(
        &self,
        _costs: &SegmentCosts,
        _params: &OracleParams,
        _rng: &mut fastrand::Rng,
    ) -> Result<UsageVector, OracleError> {
        Ok(self.pattern)
    }
}
