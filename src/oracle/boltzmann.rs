use super::{Oracle, OracleError, OracleParams};
use crate::error::{QtspError, QtspResult};
use crate::tour::{
    constraint_violations, from_key, journey_cost, CanonicalKey, SegmentCosts, UsageVector,
};

const PATTERN_COUNT: CanonicalKey = 1 << crate::tour::SEGMENT_COUNT;

/// Classical stand-in for the quantum sampler.
///
/// Draws a pattern from the Boltzmann distribution of the penalised energy
/// `cost + penalty * violations`. Lower temperatures concentrate the mass on
/// the cheapest valid tour. The theta schedules and depth are ignored.
#[derive(Debug, Clone, Copy)]
pub struct BoltzmannOracle {
    temperature: f64,
}

impl BoltzmannOracle {
    pub fn new(temperature: f64) -> QtspResult<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(QtspError::Config(format!(
                "temperature must be a positive number, got {}",
                temperature
            )));
        }
        Ok(Self { temperature })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn energy(
        costs: &SegmentCosts,
        penalty: f64,
        usage: &UsageVector,
    ) -> Result<f64, OracleError> {
        let cost = journey_cost(costs.as_slice(), usage)
            .map_err(|e| OracleError::Backend(e.to_string()))?;
        Ok(cost + penalty * constraint_violations(usage) as f64)
    }
}

impl Oracle for BoltzmannOracle {
    fn sample(
        &self,
        costs: &SegmentCosts,
        params: &OracleParams,
        rng: &mut fastrand::Rng,
    ) -> Result<UsageVector, OracleError> {
        let energies = (0..PATTERN_COUNT)
            .map(|key| Self::energy(costs, params.penalty, &from_key(key)))
            .collect::<Result<Vec<f64>, _>>()?;

        // f64::min skips NaN; check every energy.
        if let Some(key) = energies.iter().position(|e| !e.is_finite()) {
            return Err(OracleError::Backend(format!(
                "energy of pattern {} is not finite ({})",
                key, energies[key]
            )));
        }
        let min_energy = energies.iter().copied().fold(f64::INFINITY, f64::min);

        // Shifting by the minimum keeps the largest weight at exactly 1.0.
        let weights: Vec<f64> = energies
            .iter()
            .map(|e| (-(e - min_energy) / self.temperature).exp())
            .collect();
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(OracleError::Backend(format!(
                "weights do not normalise (total = {})",
                total
            )));
        }

        let mut target = rng.f64() * total;
        for (key, w) in weights.iter().enumerate() {
            if target < *w {
                return Ok(from_key(key as CanonicalKey));
            }
            target -= w;
        }

        // Rounding can leave a sliver of mass past the last bucket.
        let last = weights
            .iter()
            .rposition(|&w| w > 0.0)
            .unwrap_or(weights.len() - 1);
        Ok(from_key(last as CanonicalKey))
    }
}
