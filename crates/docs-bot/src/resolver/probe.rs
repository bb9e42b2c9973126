//! Existence probes against documentation hosts.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// Checks whether a documentation page exists.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns `Ok(true)` when `url` answered with a non-error status.
    ///
    /// Transport failures are returned as errors rather than `Ok(false)`.
    async fn exists(&self, url: &str) -> Result<bool>;
}

/// Probes pages with a plain HTTP GET, following redirects.
///
/// Any final status below 400 counts as found; the body is never inspected,
/// so soft-404 pages served with 200 are treated as existing.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Create a prober with its own HTTP client.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn exists(&self, url: &str) -> Result<bool> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let found = !(status.is_client_error() || status.is_server_error());

        debug!(url, status = status.as_u16(), found, "Probed documentation page");
        Ok(found)
    }
}
