//! # lcx CLI entry point
//!
//! Parses command-line arguments, initializes tracing, loads the engine
//! configuration and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lcx_cli::commitment::{run_commitment, CommitmentArgs};
use lcx_cli::options::{run_options, OptionsArgs};
use lcx_cli::scenario::{run_run, RunArgs};
use lcx_engine::EngineConfig;

/// LCX: Letter of Credit lifecycle and settlement engine.
#[derive(Parser, Debug)]
#[command(name = "lcx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file. Falls back to `LCX_CONFIG`, then defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log events as JSON objects on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the LC option code tables.
    Options(OptionsArgs),

    /// Run a lifecycle scenario and print receipts as JSON lines.
    Run(RunArgs),

    /// Compute a proof-gate commitment.
    Commitment(CommitmentArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Options(args) => run_options(&args, &mut stdout),
        Commands::Commitment(args) => run_commitment(&args, &mut stdout),
        Commands::Run(args) => EngineConfig::load(cli.config.as_deref())
            .map_err(anyhow::Error::from)
            .and_then(|config| {
                tracing::debug!(?config, "engine configuration loaded");
                run_run(&args, config, &mut stdout)
            }),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
