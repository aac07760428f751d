use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

pub type TransportResult<T> = Result<T, FetchError>;

/// Single-shot GET returning the raw body text.
///
/// `Ok(None)` means the response carried no body. Non-2xx responses are
/// errors, never bodies.
#[async_trait]
pub trait StoplossTransport: Send + Sync {
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> TransportResult<Option<String>>;
}

/// reqwest-backed transport used in production.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build with an optional request timeout; the reqwest default is none.
    pub fn with_timeout(timeout: Option<Duration>) -> TransportResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl StoplossTransport for HttpTransport {
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> TransportResult<Option<String>> {
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        debug!("Upstream responded {} ({} bytes)", status, text.len());

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}
