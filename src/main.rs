// ===== qtsp/src/main.rs =====
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use qtsp::config::Config;
use qtsp::sampler::CancelFlag;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with sampling and oracle settings. Explicit flags win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample one set of segment weights and print the report.
    Run(cmd::run::RunArgs),
    /// Interactive loop: enter weights, `default` or `exit`.
    Shell(cmd::shell::ShellArgs),
}

fn main() {
    // 1. Parse raw matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 2. Resolve config: JSON file first, explicit CLI flags on top
    let cli_config = match &cli.command {
        Commands::Run(args) => &args.config,
        Commands::Shell(args) => &args.config,
    };

    let config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("Failed to load config '{}': {}", path, e);
                process::exit(2);
            });
            if let Some((_, sub_matches)) = matches.subcommand() {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(2);
    }

    // 3. Ctrl-C during a run stops issuing oracle calls and the partial report
    //    is still printed; anywhere else (e.g. the shell prompt) it quits.
    let cancel = CancelFlag::new();
    let handler_flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if !handler_flag.interrupt() {
            process::exit(130);
        }
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    // 4. Execute
    let result = match &cli.command {
        Commands::Run(args) => cmd::run::run(args, &config, &cancel),
        Commands::Shell(_) => cmd::shell::run(&config, &cancel),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}
