use super::client::RetryingClient;
use super::types::DispatchError;
use crate::registry::{WorkerKey, WorkerRegistry};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Fans a query out to every available worker of one region.
pub struct RegionDispatcher {
    registry: Arc<WorkerRegistry>,
    client: Arc<RetryingClient>,
    deadline: Option<Duration>,
}

impl RegionDispatcher {
    pub fn new(registry: Arc<WorkerRegistry>, client: Arc<RetryingClient>) -> Self {
        Self {
            registry,
            client,
            deadline: None,
        }
    }

    /// Caps the whole fan-out. Workers still running at the deadline are
    /// aborted and contribute nothing.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Queries every worker currently marked available, waits for all of
    /// them and returns the merged, deduplicated results.
    ///
    /// Unavailable workers are skipped without a call. Output order follows
    /// configured endpoint order, first occurrence wins.
    pub async fn dispatch(&self, region: &str, query: &str) -> Result<Vec<String>, DispatchError> {
        let endpoints = self
            .registry
            .endpoints_of(region)
            .map_err(|_| DispatchError::UnknownRegion(region.to_string()))?;

        let query: Arc<str> = Arc::from(query);
        let mut tasks = JoinSet::new();

        for (idx, endpoint) in endpoints.iter().enumerate() {
            let key = WorkerKey::new(region, endpoint.clone());

            if !self.registry.is_available(&key) {
                tracing::info!(
                    "Skipping worker {} in region {} (unavailable)",
                    endpoint,
                    region
                );
                continue;
            }

            let client = self.client.clone();
            let query = query.clone();
            tasks.spawn(async move {
                let results = client.query(&key, &query).await;
                (idx, results)
            });
        }

        let mut batches: Vec<Option<Vec<String>>> = vec![None; endpoints.len()];
        let deadline = self.deadline.map(|d| tokio::time::Instant::now() + d);

        loop {
            let next = match deadline {
                Some(at) => {
                    let joined = tokio::time::timeout_at(at, tasks.join_next()).await;
                    match joined {
                        Ok(next) => next,
                        Err(_) => {
                            tracing::warn!(
                                "Region {} hit its dispatch deadline with {} workers outstanding",
                                region,
                                tasks.len()
                            );
                            tasks.abort_all();
                            break;
                        }
                    }
                }
                None => tasks.join_next().await,
            };

            match next {
                Some(Ok((idx, results))) => batches[idx] = Some(results),
                Some(Err(e)) => {
                    return Err(DispatchError::WorkerTask {
                        region: region.to_string(),
                        source: e,
                    });
                }
                None => break,
            }
        }

        Ok(merge_unique(batches.into_iter().flatten()))
    }
}

/// Flattens result batches and drops repeated items, keeping the first
/// occurrence of each.
pub fn merge_unique<I>(batches: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for item in batches.into_iter().flatten() {
        if seen.insert(item.clone()) {
            merged.push(item);
        }
    }

    merged
}
