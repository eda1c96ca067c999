use crate::aggregator::{AggregatedRecord, ResultAggregator};
use crate::config::Config;
use crate::error::{QtspError, QtspResult};
use crate::oracle::{Oracle, OracleParams};
use crate::tour::{
    exact_optimum, is_valid_tour, journey_cost, ExactOptimum, SegmentCosts, UsageVector,
};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct SamplingOptions {
    pub trials: usize,
    pub batch_size: usize,
    pub num_threads: usize,
    pub seed: Option<u64>,
    pub max_time: Option<Duration>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            trials: 1000,
            batch_size: 100,
            num_threads: 1,
            seed: None,
            max_time: None,
        }
    }
}

impl From<&Config> for SamplingOptions {
    fn from(cfg: &Config) -> Self {
        let num_threads = match cfg.sampling.threads {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            n => n,
        };
        Self {
            trials: cfg.sampling.trials,
            batch_size: cfg.sampling.batch_size.max(1),
            num_threads,
            seed: cfg.sampling.seed,
            max_time: cfg.sampling.max_time_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub best_valid: Option<AggregatedRecord>,
    pub records: Vec<AggregatedRecord>,
    /// Oracle invocations actually made.
    pub trial_count: usize,
    pub requested_trials: usize,
    pub cancelled: bool,
    pub seed: u64,
    pub elapsed_ms: u64,
    pub exact_optimum: Option<ExactOptimum>,
}

impl RunReport {
    /// Share of trials that landed on the best valid cycle.
    pub fn best_hit_rate(&self) -> Option<f64> {
        match (&self.best_valid, self.trial_count) {
            (Some(best), n) if n > 0 => Some(best.count as f64 / n as f64),
            _ => None,
        }
    }

    pub fn found_optimum(&self) -> bool {
        match (&self.best_valid, &self.exact_optimum) {
            (Some(best), Some(opt)) => best.key == opt.key || best.cost <= opt.cost,
            _ => false,
        }
    }
}

/// Asked before every batch and told once more when the run finishes.
/// Returning false stops the run before any further oracle call; the report
/// so far is returned as cancelled.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize, best: Option<&AggregatedRecord>) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: usize, _: Option<&AggregatedRecord>) -> bool {
        true
    }
}

/// Shared stop switch, flipped from a Ctrl-C handler.
///
/// An interrupt only cancels while a run is active (see [`CancelFlag::begin`]);
/// outside a run `interrupt` reports false so the caller can quit instead.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Clears any stale cancellation and marks a run as active until the
    /// returned guard is dropped.
    pub fn begin(&self) -> ActiveRun<'_> {
        self.reset();
        self.active.store(true, Ordering::SeqCst);
        ActiveRun { flag: self }
    }

    /// Cancels the active run and returns true, or returns false when idle.
    pub fn interrupt(&self) -> bool {
        if self.is_active() {
            self.cancel();
            true
        } else {
            false
        }
    }
}

pub struct ActiveRun<'a> {
    flag: &'a CancelFlag,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.flag.active.store(false, Ordering::SeqCst);
    }
}

impl ProgressCallback for CancelFlag {
    fn on_progress(&self, _: usize, _: usize, _: Option<&AggregatedRecord>) -> bool {
        !self.is_cancelled()
    }
}

pub struct SamplingDriver {
    oracle: Arc<dyn Oracle>,
    params: OracleParams,
    options: SamplingOptions,
}

impl SamplingDriver {
    pub fn new(oracle: Arc<dyn Oracle>, params: OracleParams, options: SamplingOptions) -> Self {
        Self {
            oracle,
            params,
            options,
        }
    }

    pub fn options(&self) -> &SamplingOptions {
        &self.options
    }

    /// Samples the oracle `trials` times and aggregates the outcomes.
    ///
    /// Fails before any oracle call if `segment_costs` does not hold six
    /// entries. An oracle error aborts the whole run.
    pub fn run<CB: ProgressCallback>(
        &self,
        segment_costs: &[f64],
        callback: &CB,
    ) -> QtspResult<RunReport> {
        let costs = SegmentCosts::new(segment_costs)?;
        let opts = &self.options;

        let seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
        let pool = if opts.num_threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(opts.num_threads)
                    .build()
                    .map_err(|e| QtspError::Config(format!("thread pool: {}", e)))?,
            )
        } else {
            None
        };

        info!(
            "Sampling {} trials (seed {}, {} thread(s))",
            opts.trials, seed, opts.num_threads
        );

        let mut aggregator = ResultAggregator::new();
        let mut completed = 0;
        let mut cancelled = false;
        let start_time = Instant::now();
        let batch_size = opts.batch_size.max(1);

        while completed < opts.trials {
            if !callback.on_progress(completed, opts.trials, aggregator.best()) {
                warn!("Run cancelled after {} of {} trials", completed, opts.trials);
                cancelled = true;
                break;
            }
            if let Some(limit) = opts.max_time {
                if start_time.elapsed() >= limit {
                    warn!(
                        "Time limit reached after {} of {} trials",
                        completed, opts.trials
                    );
                    cancelled = true;
                    break;
                }
            }

            let end = (completed + batch_size).min(opts.trials);
            let samples = match &pool {
                Some(pool) => pool.install(|| {
                    (completed..end)
                        .into_par_iter()
                        .map(|trial| self.sample_trial(&costs, seed, trial))
                        .collect::<QtspResult<Vec<_>>>()
                })?,
                None => (completed..end)
                    .map(|trial| self.sample_trial(&costs, seed, trial))
                    .collect::<QtspResult<Vec<_>>>()?,
            };

            // Single consumer: batch order equals trial order.
            for usage in &samples {
                let cost = journey_cost(costs.as_slice(), usage)?;
                aggregator.observe(usage, cost, is_valid_tour(usage));
            }
            completed = end;

            debug!(
                "Batch done: {}/{} trials, {} distinct outcomes",
                completed,
                opts.trials,
                aggregator.len()
            );
        }
        if !cancelled {
            // Final tick; the return value is ignored.
            callback.on_progress(completed, opts.trials, aggregator.best());
        }

        let (best_valid, records) = aggregator.snapshot();
        let report = RunReport {
            best_valid,
            records,
            trial_count: completed,
            requested_trials: opts.trials,
            cancelled,
            seed,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
            exact_optimum: exact_optimum(&costs),
        };

        match &report.best_valid {
            Some(best) => info!(
                "Run complete: best cycle {} (cost {:.2}) seen {} times",
                best.cycle(),
                best.cost,
                best.count
            ),
            None => info!("Run complete: no valid cycle found"),
        }

        Ok(report)
    }

    fn sample_trial(&self, costs: &SegmentCosts, seed: u64, trial: usize) -> QtspResult<UsageVector> {
        let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(trial as u64));
        Ok(self.oracle.sample(costs, &self.params, &mut rng)?)
    }
}
