use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

/// Probe every LOCATION with a concurrent HTTP GET and print each latency as
/// its response arrives.
#[derive(Parser, Debug)]
#[command(name = "httpracer", version, about, long_about = None)]
pub struct Cli {
    /// Absolute URLs to probe
    pub locations: Vec<String>,

    /// YAML file with additional targets, probed alongside LOCATION
    #[arg(short, long, env = "HTTPRACER_TARGETS")]
    pub targets: Option<PathBuf>,

    /// Per-request deadline for response headers, e.g. `5s` or `250ms`
    #[arg(long, env = "HTTPRACER_TIMEOUT", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Maximum number of requests in flight, at least 1 (unbounded if unset)
    #[arg(long, env = "HTTPRACER_MAX_IN_FLIGHT")]
    pub max_in_flight: Option<NonZeroUsize>,

    /// Diagnostic log level written to stderr
    #[arg(long, env = "HTTPRACER_LOG_LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}

/// Identifier used to prefix failure lines: the invoked program path.
pub fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
