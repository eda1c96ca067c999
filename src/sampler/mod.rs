pub mod runner;

pub use self::runner::{
    ActiveRun, CancelFlag, NoProgress, ProgressCallback, RunReport, SamplingDriver, SamplingOptions,
};
