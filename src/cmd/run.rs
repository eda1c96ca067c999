use clap::Args;
use qtsp::config::Config;
use qtsp::error::QtspResult;
use qtsp::input::parse_weights;
use qtsp::oracle::build_oracle;
use qtsp::report::{self, ReportFormat};
use qtsp::sampler::{CancelFlag, SamplingDriver, SamplingOptions};
use qtsp::tour::DEFAULT_SEGMENT_COSTS;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: Config,

    /// Six segment weights, or `default` for the reference instance.
    pub weights: Vec<String>,

    #[arg(short, long, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs, config: &Config, cancel: &CancelFlag) -> QtspResult<()> {
    let weights = if args.weights.len() == 1 && args.weights[0] == "default" {
        DEFAULT_SEGMENT_COSTS.to_vec()
    } else {
        parse_weights(&args.weights.join(" "))?
    };

    let oracle = build_oracle(&config.oracle)?;
    let params = config.oracle.resolve()?;
    let driver = SamplingDriver::new(oracle, params, SamplingOptions::from(config));

    info!("🎲 simulating ({} oracle)...", config.oracle.oracle);
    let report = {
        let _active = cancel.begin();
        driver.run(&weights, cancel)?
    };

    let rendered = report::render(&report, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("💾 Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
