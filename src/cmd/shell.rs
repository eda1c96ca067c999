use clap::Args;
use qtsp::config::Config;
use qtsp::error::{QtspError, QtspResult};
use qtsp::input::{parse_command, ShellCommand};
use qtsp::oracle::build_oracle;
use qtsp::report::render_text;
use qtsp::sampler::{CancelFlag, SamplingDriver, SamplingOptions};
use qtsp::tour::{SegmentCosts, DEFAULT_SEGMENT_COSTS};
use std::io::{self, BufRead, Write};

#[derive(Args, Debug, Clone)]
pub struct ShellArgs {
    #[command(flatten)]
    pub config: Config,
}

// Segment numbering on the 4-city map: 1 top, 2 right, 3 bottom, 4 left,
// 5 and 6 the two diagonals.
const MAP: &str = "\
#11111111111#
4 5       6 2
4   5   6   2
4     X     2
4   6   5   2
4 6       5 2
#33333333333#";

pub fn run(config: &Config, cancel: &CancelFlag) -> QtspResult<()> {
    let oracle = build_oracle(&config.oracle)?;
    let driver = SamplingDriver::new(
        oracle,
        config.oracle.resolve()?,
        SamplingOptions::from(config),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&driver, stdin.lock(), stdout.lock(), cancel)
}

/// Reads commands until `exit` or end of input. Bad input is reported and
/// the loop carries on; only I/O failures end the session with an error.
pub fn run_session<R: BufRead, W: Write>(
    driver: &SamplingDriver,
    input: R,
    mut out: W,
    cancel: &CancelFlag,
) -> QtspResult<()> {
    writeln!(out, "QTSP v{}\n", env!("CARGO_PKG_VERSION"))?;
    let mut lines = input.lines();

    loop {
        writeln!(out, "{}", MAP)?;
        writeln!(out, "enter 6 weights")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let weights = match parse_command(&line) {
            Ok(ShellCommand::Exit) => break,
            Ok(ShellCommand::Default) => DEFAULT_SEGMENT_COSTS.to_vec(),
            Ok(ShellCommand::Weights(w)) => w,
            Err(QtspError::MalformedNumericInput { token, position }) => {
                writeln!(out, "error, invalid number '{}' at position {}", token, position)?;
                continue;
            }
            Err(e) => {
                writeln!(out, "error, {}", e)?;
                continue;
            }
        };

        if SegmentCosts::new(&weights).is_err() {
            writeln!(out, "error, there have to be 6 weights")?;
            continue;
        }

        writeln!(out, "simulating...")?;
        let result = {
            let _active = cancel.begin();
            driver.run(&weights, cancel)
        };
        match result {
            Ok(report) => write!(out, "{}", render_text(&report))?,
            Err(e) => writeln!(out, "error, {}", e)?,
        }
        writeln!(out)?;
    }
    Ok(())
}
