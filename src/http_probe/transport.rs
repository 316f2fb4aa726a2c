use std::future::Future;
use std::time::Instant;

use reqwest::{Client, Response};
use url::Url;

use super::error::BoxError;
use super::result::Head;

/// Performs the single GET behind a probe, in two steps.
///
/// `send` resolves once the status line and headers are in and hands back
/// whatever is needed to finish the exchange. `discard` reads the rest and
/// releases the connection. Dropping a body unread must also release it.
/// Failures are reported as an `Err`, never as a panic.
pub trait Transport: Send + Sync + 'static {
    type Body: Send + 'static;

    fn send(&self, url: Url) -> impl Future<Output = Result<(Head, Self::Body), BoxError>> + Send;

    fn discard(&self, body: Self::Body) -> impl Future<Output = ()> + Send;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with the crate's user agent and no request timeout of
    /// its own. Deadlines are applied by the prober.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client))
    }
}

impl Transport for HttpTransport {
    type Body = Response;

    async fn send(&self, url: Url) -> Result<(Head, Response), BoxError> {
        let response = self.client.get(url).send().await?;
        let head = Head {
            status: response.status().as_u16(),
            received_at: Instant::now(),
        };
        Ok((head, response))
    }

    async fn discard(&self, mut response: Response) {
        // Read the body to the end so the connection goes back to the pool.
        loop {
            match response.chunk().await {
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(e) => {
                    log::debug!("Discarding body of {} failed: {e}", response.url());
                    break;
                }
            }
        }
    }
}
