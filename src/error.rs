use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Failures that stop the program before or while it prints outcomes.
///
/// Per-location problems are never reported through here.
#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("Failed to read targets file {}: {source}", path.display())]
    TargetsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid targets file {}: {source}", path.display())]
    TargetsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
