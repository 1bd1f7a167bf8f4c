use std::time::Duration;

use async_trait::async_trait;
use tidepool_crdt::LwwSet;

use crate::error::TransportError;

/// Fetches peer snapshots on behalf of the coordinator.
///
/// The transport owns the per-request timeout; the coordinator only sees a
/// snapshot or a [TransportError] per peer.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Fetches and decodes the full snapshot served at `url`.
    async fn fetch_snapshot(&self, url: &str) -> Result<LwwSet, TransportError>;
}

#[derive(Debug, Clone)]
/// A [Transport] that pulls JSON snapshots over plain HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport whose requests abort after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_snapshot(&self, url: &str) -> Result<LwwSet, TransportError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::BadStatus(response.status().as_u16()));
        }

        let payload = response.bytes().await?;
        let snapshot = serde_json::from_slice(&payload)?;

        Ok(snapshot)
    }
}
