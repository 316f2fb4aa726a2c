use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::probe_config::TargetsFile;
use crate::cli::Cli;
use crate::dispatch::Concurrency;
use crate::error::AppError;
use crate::http_probe::prelude::ProbeConfig;

/// Everything a run needs, resolved from the command line, the environment
/// and an optional targets file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Targets file entries first, then positional locations.
    pub locations: Vec<String>,
    pub timeout: Option<Duration>,
    pub max_in_flight: Option<NonZeroUsize>,
}

impl AppConfig {
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            timeout: self.timeout,
        }
    }

    pub fn concurrency(&self) -> Concurrency {
        Concurrency::from_limit(self.max_in_flight)
    }
}

/// Load `.env` if present. Must run before the command line is parsed so the
/// `HTTPRACER_*` variables it sets are seen by clap, which also means before
/// the logger exists; the caller logs the result.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Build the application configuration from parsed arguments.
/// Reads the targets file named by `--targets` / `HTTPRACER_TARGETS`, if any.
pub fn load_config(cli: Cli) -> Result<AppConfig, AppError> {
    let mut locations = match &cli.targets {
        Some(path) => read_targets(path)?,
        None => Vec::new(),
    };
    locations.extend(cli.locations);

    Ok(AppConfig {
        locations,
        timeout: cli.timeout,
        max_in_flight: cli.max_in_flight,
    })
}

fn read_targets(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::TargetsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: TargetsFile =
        serde_yaml::from_str(&contents).map_err(|source| AppError::TargetsParse {
            path: path.to_path_buf(),
            source,
        })?;
    let locations: Vec<String> = file.locations().collect();
    log::info!("Loaded {} targets from {}", locations.len(), path.display());
    Ok(locations)
}
