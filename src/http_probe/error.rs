use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error as ThisError;

/// Boxed error handed back by a [`Transport`](super::transport::Transport).
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Why a single location could not be probed.
///
/// Every variant is terminal for its location only. The dispatcher never sees
/// these as failures of its own, they travel to the collector inside an
/// [`Outcome`](super::result::Outcome).
#[derive(Debug, ThisError)]
pub enum ProbeError {
    #[error("parse {location:?}: {source}")]
    InvalidUri {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Get {url:?}: {}", super::report(&**source))]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Get {url:?}: no response within {}", humantime::format_duration(*after))]
    Timeout { url: String, after: Duration },

    /// The task probing this location died before reporting.
    #[error("probe of {location:?} aborted: {source}")]
    Aborted {
        location: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[derive(Debug, ThisError)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, ThisError)]
    #[error("connection refused")]
    struct Inner;

    #[test]
    fn test_invalid_uri_message_quotes_input() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = ProbeError::InvalidUri {
            location: "not a url".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "parse \"not a url\": relative URL without a base"
        );
    }

    #[test]
    fn test_transport_message_flattens_source_chain() {
        let err = ProbeError::Transport {
            url: "http://127.0.0.1:1/".to_string(),
            source: Box::new(Outer(Inner)),
        };
        assert_eq!(
            err.to_string(),
            "Get \"http://127.0.0.1:1/\": outer: connection refused"
        );
    }

    #[test]
    fn test_timeout_message_uses_human_duration() {
        let err = ProbeError::Timeout {
            url: "http://example.test/".to_string(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(
            err.to_string(),
            "Get \"http://example.test/\": no response within 1s 500ms"
        );
    }
}
