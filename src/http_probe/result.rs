use std::time::{Duration, Instant};

use super::error::ProbeError;

/// What a transport saw once the response headers arrived.
#[derive(Debug, Clone, Copy)]
pub struct Head {
    pub status: u16,
    pub received_at: Instant,
}

/// A completed request: status and time to headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub elapsed: Duration,
}

/// The result of probing one location.
///
/// Either a [`Reply`] or a [`ProbeError`], never both. `location` holds the
/// canonical URL on success and the caller's input verbatim on failure.
#[derive(Debug)]
pub struct Outcome {
    pub location: String,
    pub result: Result<Reply, ProbeError>,
}

impl Outcome {
    pub fn success(location: String, reply: Reply) -> Self {
        Self {
            location,
            result: Ok(reply),
        }
    }

    pub fn failure(location: String, error: ProbeError) -> Self {
        Self {
            location,
            result: Err(error),
        }
    }

    /// HTTP status, or `0` when the request failed.
    pub fn status_code(&self) -> u16 {
        self.result.as_ref().map(|r| r.status).unwrap_or(0)
    }

    /// Time to response headers, or zero when the request failed.
    pub fn elapsed(&self) -> Duration {
        self.result
            .as_ref()
            .map(|r| r.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.result.as_ref().err()
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_failure_zeroes_status_and_elapsed() {
        let source = url::Url::parse("").unwrap_err();
        let outcome = Outcome::failure(
            String::new(),
            ProbeError::InvalidUri {
                location: String::new(),
                source,
            },
        );
        assert!(outcome.error().is_some());
        assert_eq!(outcome.status_code(), 0);
        assert_eq!(outcome.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_success_exposes_reply() {
        let reply = Reply {
            status: 204,
            elapsed: Duration::from_millis(12),
        };
        let outcome = Outcome::success("http://example.test/".to_string(), reply);
        assert!(outcome.error().is_none());
        assert_eq!(outcome.status_code(), 204);
        assert_eq!(outcome.elapsed(), Duration::from_millis(12));
    }
}
