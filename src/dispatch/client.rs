use crate::registry::{WorkerKey, WorkerRegistry};
use crate::transport::{WorkerTransport, bounded};

use std::sync::Arc;
use std::time::Duration;

/// Issues one worker's search with a bounded number of immediate retries.
///
/// Failures never reach the caller: an exhausted worker is marked unavailable
/// under its (region, endpoint) key and contributes an empty result.
pub struct RetryingClient {
    transport: Arc<dyn WorkerTransport>,
    registry: Arc<WorkerRegistry>,
    timeout: Duration,
    max_retries: u32,
}

impl RetryingClient {
    pub fn new(
        transport: Arc<dyn WorkerTransport>,
        registry: Arc<WorkerRegistry>,
        timeout: Duration,
        max_retries: u32,
    ) -> Self {
        Self {
            transport,
            registry,
            timeout,
            max_retries,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub async fn query(&self, key: &WorkerKey, query: &str) -> Vec<String> {
        self.query_with_retries(key, query, self.max_retries).await
    }

    /// Attempts the search up to `retries` times back to back; no backoff.
    pub async fn query_with_retries(
        &self,
        key: &WorkerKey,
        query: &str,
        retries: u32,
    ) -> Vec<String> {
        for attempt in 1..=retries {
            let call = self.transport.search(&key.endpoint, query, self.timeout);
            match bounded(self.timeout, call).await {
                Ok(results) => {
                    tracing::debug!(
                        "Worker {} answered {:?} with {} results (attempt {})",
                        key,
                        query,
                        results.len(),
                        attempt
                    );
                    return results;
                }
                Err(e) => {
                    tracing::debug!(
                        "Attempt {} failed for worker {} in region {}: {}",
                        attempt,
                        key.endpoint,
                        key.region,
                        e
                    );
                }
            }
        }

        match self.registry.mark_unavailable(key) {
            Ok(true) => tracing::warn!(
                "Worker {} in region {} marked unavailable after {} failed attempts",
                key.endpoint,
                key.region,
                retries
            ),
            Ok(false) => {}
            Err(e) => tracing::error!("Failed to mark {} unavailable: {}", key, e),
        }

        Vec::new()
    }
}
