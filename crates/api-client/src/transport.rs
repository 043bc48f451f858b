//! Transport seam: "send a request, return a response or a failure"
//!
//! `Client` depends on this trait rather than on `reqwest::Client` directly so
//! tests can substitute a deterministic double. The production implementation
//! wraps one pooled `reqwest::Client`, which is safe for concurrent use
//! without external locking.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

/// Boxed future used by dyn-compatible traits in this workspace.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sends one HTTP request.
///
/// Implementations must map connection-level failures to `Error::Transport`
/// and must not retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, Result<reqwest::Response>>;
}

/// Production transport over a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a pooled client with the given timeout and idle-connection bound.
    pub fn new(timeout: Duration, max_idle_per_host: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_idle_per_host)
            .build()
            .map_err(|e| Error::Transport(format!("building http client: {e}")))?;
        debug!(
            timeout_ms = timeout.as_millis() as u64,
            max_idle_per_host, "built pooled http client"
        );
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, Result<reqwest::Response>> {
        Box::pin(async move {
            self.client.execute(request).await.map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("request timed out: {e}"))
                } else {
                    Error::Transport(e.to_string())
                }
            })
        })
    }
}
