use super::protocol::{ENDPOINT_HEALTH, ENDPOINT_SEARCH, WorkerSearchResponse};
use super::{TransportError, WorkerTransport};
use crate::registry::WorkerEndpoint;

use async_trait::async_trait;
use std::time::Duration;

/// `WorkerTransport` over plain HTTP/JSON.
#[derive(Clone, Default)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WorkerTransport for HttpTransport {
    async fn health(
        &self,
        endpoint: &WorkerEndpoint,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let response = self
            .http_client
            .get(endpoint.url(ENDPOINT_HEALTH))
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    async fn search(
        &self,
        endpoint: &WorkerEndpoint,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<String>, TransportError> {
        let response = self
            .http_client
            .get(endpoint.url(ENDPOINT_SEARCH))
            .query(&[("q", query)])
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let body: WorkerSearchResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(body.results)
    }
}
