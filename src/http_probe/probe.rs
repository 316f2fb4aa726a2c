use std::time::{Duration, Instant};

use tokio::time::timeout;
use url::Url;

use super::prelude::*;

/// Per-request settings handed to every [`Prober`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Give up on a location once this much time has passed without response
    /// headers. `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

/// Turns one location string into one [`Outcome`].
#[derive(Debug, Clone)]
pub struct Prober<T> {
    transport: T,
    config: ProbeConfig,
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T, config: ProbeConfig) -> Self {
        Self { transport, config }
    }

    /// Validate `location`, GET it once and time the response headers.
    ///
    /// Never fails: parse errors, transport errors and timeouts all come back
    /// as an [`Outcome`] carrying a [`ProbeError`]. A location that does not
    /// parse as an absolute URL never reaches the transport.
    pub async fn probe(&self, location: &str) -> Outcome {
        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(source) => {
                log::debug!("Rejected {location:?}: {source}");
                return Outcome::failure(
                    location.to_string(),
                    ProbeError::InvalidUri {
                        location: location.to_string(),
                        source,
                    },
                );
            }
        };
        let canonical = url.to_string();

        let start = Instant::now();
        let request = self.transport.send(url);
        let result = match self.config.timeout {
            Some(after) => match timeout(after, request).await {
                Ok(result) => result,
                Err(_) => {
                    log::debug!("No headers from {canonical} within {after:?}");
                    return Outcome::failure(
                        location.to_string(),
                        ProbeError::Timeout {
                            url: canonical,
                            after,
                        },
                    );
                }
            },
            None => request.await,
        };

        let (head, body) = match result {
            Ok(sent) => sent,
            Err(source) => {
                log::debug!("Request to {canonical} failed: {source}");
                return Outcome::failure(
                    location.to_string(),
                    ProbeError::Transport {
                        url: canonical,
                        source,
                    },
                );
            }
        };

        let elapsed = head.received_at.saturating_duration_since(start);
        log::debug!("{canonical} answered {} in {elapsed:?}", head.status);

        // The status is already in; a slow body only costs time, never the outcome.
        let drain = self.transport.discard(body);
        match self.config.timeout {
            Some(after) => {
                if timeout(after, drain).await.is_err() {
                    log::debug!("Gave up reading the body of {canonical} after {after:?}");
                }
            }
            None => drain.await,
        }

        Outcome::success(
            canonical,
            Reply {
                status: head.status,
                elapsed,
            },
        )
    }
}
