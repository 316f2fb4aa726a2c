use std::io;
use std::process::ExitCode;

use clap::Parser;

pub mod cli;
use cli::{Cli, program_name};
pub mod collector;
use collector::{Sinks, drain};
pub mod config;
use config::app_config::{load_config, load_dotenv};
pub mod dispatch;
use dispatch::dispatch;
pub mod error;
use error::AppError;
pub mod http_probe;
use http_probe::prelude::*;
pub mod logger;

#[tokio::main]
async fn main() -> ExitCode {
    let program = program_name();
    match run(program.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{program}: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(program: String) -> Result<(), AppError> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    logger::initialize(cli.log_level)?;

    match dotenv {
        Ok(Some(path)) => log::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => log::warn!("Ignoring .env: {e}"),
    }
    let config = load_config(cli)?;

    // Nothing to probe still runs the pipeline; it closes at once and exits 0.
    if config.locations.is_empty() {
        eprintln!("{program}: need at least one argument.");
    }

    let transport = HttpTransport::with_defaults()?;
    let prober = Prober::new(transport, config.probe_config());
    log::info!(
        "Probing {} locations ({:?}, timeout {:?})",
        config.locations.len(),
        config.concurrency(),
        config.timeout
    );
    let concurrency = config.concurrency();
    let outcomes = dispatch(prober, config.locations, concurrency);

    let mut sinks = Sinks {
        program,
        out: io::stdout(),
        err: io::stderr(),
    };
    let tally = drain(outcomes, &mut sinks).await?;
    log::debug!(
        "{} outcomes: {} succeeded, {} failed",
        tally.total(),
        tally.succeeded,
        tally.failed
    );

    Ok(())
}
