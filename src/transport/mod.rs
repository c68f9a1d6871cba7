//! Worker Transport
//!
//! The gateway only ever needs two things from a worker: "are you healthy?"
//! and "search your shard for `q`". `WorkerTransport` captures that contract so
//! the heartbeat and dispatch paths can run against HTTP in production and
//! against scripted fakes in tests.

pub mod http;
pub mod protocol;

pub use http::HttpTransport;

use crate::registry::WorkerEndpoint;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Every way a single worker call can fail. All of them are transient from the
/// gateway's point of view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
pub trait WorkerTransport: Send + Sync {
    /// Single liveness probe. `Ok` only for a 2xx answer within `timeout`.
    async fn health(
        &self,
        endpoint: &WorkerEndpoint,
        timeout: Duration,
    ) -> Result<(), TransportError>;

    /// Single search attempt. No retries at this level.
    async fn search(
        &self,
        endpoint: &WorkerEndpoint,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<String>, TransportError>;
}

/// Runs `call` under `timeout` regardless of whether the transport enforces it.
pub(crate) async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, TransportError>
where
    F: std::future::Future<Output = Result<T, TransportError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout),
    }
}
