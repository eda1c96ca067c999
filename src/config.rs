use crate::error::{QtspError, QtspResult};
use crate::oracle::{OracleParams, REFERENCE_THETA_X, REFERENCE_THETA_Z};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Comma separated form used by `--theta-x` / `--theta-z`.
pub fn schedule_string(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub sampling: SamplingParams,
    #[command(flatten)]
    pub oracle: OracleSettings,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    #[arg(long, default_value_t = 1000)]
    pub trials: usize,
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,
    // 0 = one worker per core, 1 = sequential
    #[arg(long, default_value_t = 1)]
    pub threads: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub max_time_secs: Option<u64>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            trials: 1000,
            batch_size: 100,
            threads: 1,
            seed: None,
            max_time_secs: None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    Boltzmann,
    Fixed,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    // === QAOA HYPERPARAMETERS ===
    #[arg(long, default_value_t = 20.0)]
    pub penalty: f64,
    #[arg(long, default_value_t = schedule_string(&REFERENCE_THETA_X), allow_hyphen_values = true)]
    pub theta_x: String,
    #[arg(long, default_value_t = schedule_string(&REFERENCE_THETA_Z), allow_hyphen_values = true)]
    pub theta_z: String,
    #[arg(long, default_value_t = REFERENCE_THETA_X.len())]
    pub depth: usize,

    // === BACKEND ===
    #[arg(long, default_value_t = OracleKind::Boltzmann)]
    pub oracle: OracleKind,
    #[arg(long, default_value_t = 4.0)]
    pub temperature: f64,
    #[arg(long, default_value = "101011")]
    pub pattern: String,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            penalty: 20.0,
            theta_x: schedule_string(&REFERENCE_THETA_X),
            theta_z: schedule_string(&REFERENCE_THETA_Z),
            depth: REFERENCE_THETA_X.len(),
            oracle: OracleKind::Boltzmann,
            temperature: 4.0,
            pattern: "101011".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QtspResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> QtspResult<()> {
        if self.sampling.batch_size == 0 {
            return Err(QtspError::Config("--batch-size must be at least 1".into()));
        }
        let t = self.oracle.temperature;
        if !t.is_finite() || t <= 0.0 {
            return Err(QtspError::Config(format!(
                "--temperature must be a positive number, got {}",
                t
            )));
        }
        self.oracle.resolve()?;
        Ok(())
    }

    /// Copies every flag the user typed explicitly over the file-provided values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(sampling, trials);
        update_if_present!(sampling, batch_size);
        update_if_present!(sampling, threads);
        update_if_present!(sampling, seed);
        update_if_present!(sampling, max_time_secs);

        update_if_present!(oracle, penalty);
        update_if_present!(oracle, theta_x);
        update_if_present!(oracle, theta_z);
        update_if_present!(oracle, depth);
        update_if_present!(oracle, oracle);
        update_if_present!(oracle, temperature);
        update_if_present!(oracle, pattern);
    }
}

impl OracleSettings {
    /// Parses the theta schedules. Each must have exactly `depth` entries.
    pub fn resolve(&self) -> QtspResult<OracleParams> {
        let theta_x = parse_f64_list(&self.theta_x, "theta_x")?;
        let theta_z = parse_f64_list(&self.theta_z, "theta_z")?;

        for (name, values) in [("theta_x", &theta_x), ("theta_z", &theta_z)] {
            if values.len() != self.depth {
                return Err(QtspError::Config(format!(
                    "--{} has {} values but --depth is {}",
                    name.replace('_', "-"),
                    values.len(),
                    self.depth
                )));
            }
        }

        Ok(OracleParams {
            penalty: self.penalty,
            theta_x,
            theta_z,
            depth: self.depth,
        })
    }
}

fn parse_f64_list(s: &str, name: &str) -> QtspResult<Vec<f64>> {
    s.split(',')
        .map(|p| {
            p.trim().parse::<f64>().map_err(|_| {
                QtspError::Config(format!(
                    "Invalid number '{}' in --{}",
                    p.trim(),
                    name.replace('_', "-")
                ))
            })
        })
        .collect()
}
