pub mod boltzmann;
pub mod fixed;

pub use self::boltzmann::BoltzmannOracle;
pub use self::fixed::FixedOracle;

use crate::config::{OracleKind, OracleSettings};
use crate::error::QtspResult;
use crate::tour::{parse_pattern, SegmentCosts, UsageVector};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("backend failed: {0}")]
    Backend(String),
}

// Reference QAOA schedule, depth 5.
pub const REFERENCE_THETA_X: [f64; 5] = [0.619193, 0.742566, 0.060035, -1.568955, 0.045490];
pub const REFERENCE_THETA_Z: [f64; 5] = [3.182203, -1.139045, 0.221082, 0.537753, -0.417222];

/// Hyperparameters handed to the oracle on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleParams {
    pub penalty: f64,
    pub theta_x: Vec<f64>,
    pub theta_z: Vec<f64>,
    pub depth: usize,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            penalty: 20.0,
            theta_x: REFERENCE_THETA_X.to_vec(),
            theta_z: REFERENCE_THETA_Z.to_vec(),
            depth: REFERENCE_THETA_X.len(),
        }
    }
}

/// A sampler proposing one segment selection per call.
///
/// Implementations must be usable from several threads at once; all per-call
/// randomness comes from `rng`, which the driver seeds independently for every
/// trial.
pub trait Oracle: Send + Sync {
    fn sample(
        &self,
        costs: &SegmentCosts,
        params: &OracleParams,
        rng: &mut fastrand::Rng,
    ) -> Result<UsageVector, OracleError>;
}

pub fn build_oracle(settings: &OracleSettings) -> QtspResult<Arc<dyn Oracle>> {
    let oracle: Arc<dyn Oracle> = match settings.oracle {
        OracleKind::Boltzmann => Arc::new(BoltzmannOracle::new(settings.temperature)?),
        OracleKind::Fixed => Arc::new(FixedOracle::new(parse_pattern(&settings.pattern)?)),
    };
    Ok(oracle)
}
