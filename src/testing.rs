//! Shared fixtures for unit tests: a scripted in-memory transport and a
//! compact topology builder.

use crate::registry::{Region, RegionTopology, Topology, WorkerEndpoint};
use crate::transport::{TransportError, WorkerTransport};

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Builds a topology from `(region, workers, fallbacks)` triples.
pub fn topology(regions: &[(&str, &[&str], &[&str])]) -> Topology {
    let regions: BTreeMap<Region, RegionTopology> = regions
        .iter()
        .map(|(name, workers, fallbacks)| {
            (
                Region::from(*name),
                RegionTopology {
                    endpoints: workers.iter().map(|w| WorkerEndpoint::from(*w)).collect(),
                    fallbacks: fallbacks.iter().map(|f| Region::from(*f)).collect(),
                },
            )
        })
        .collect();

    Topology::new(regions)
}

#[derive(Default)]
struct WorkerScript {
    health: VecDeque<Result<(), TransportError>>,
    health_default: Option<Result<(), TransportError>>,
    search: VecDeque<Result<Vec<String>, TransportError>>,
    search_default: Option<Result<Vec<String>, TransportError>>,
    search_delay: Option<Duration>,
    health_calls: usize,
    search_calls: usize,
}

/// In-memory worker fleet. Unscripted calls answer healthy / empty results.
#[derive(Default)]
pub struct ScriptedTransport {
    workers: Mutex<HashMap<String, WorkerScript>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_script<R>(&self, endpoint: &str, f: impl FnOnce(&mut WorkerScript) -> R) -> R {
        let mut workers = self.workers.lock().unwrap();
        f(workers.entry(endpoint.to_string()).or_default())
    }

    /// Every search on `endpoint` returns `results`.
    pub fn serve(&self, endpoint: &str, results: &[&str]) {
        let results: Vec<String> = results.iter().map(|r| r.to_string()).collect();
        self.with_script(endpoint, |s| s.search_default = Some(Ok(results)));
    }

    /// Every call to `endpoint` fails.
    pub fn fail(&self, endpoint: &str, error: TransportError) {
        self.with_script(endpoint, |s| {
            s.search_default = Some(Err(error.clone()));
            s.health_default = Some(Err(error));
        });
    }

    /// Queue one-off search outcomes consumed before the default applies.
    pub fn push_search(&self, endpoint: &str, outcome: Result<Vec<String>, TransportError>) {
        self.with_script(endpoint, |s| s.search.push_back(outcome));
    }

    pub fn push_health(&self, endpoint: &str, outcome: Result<(), TransportError>) {
        self.with_script(endpoint, |s| s.health.push_back(outcome));
    }

    pub fn set_health(&self, endpoint: &str, outcome: Result<(), TransportError>) {
        self.with_script(endpoint, |s| s.health_default = Some(outcome));
    }

    pub fn delay_search(&self, endpoint: &str, delay: Duration) {
        self.with_script(endpoint, |s| s.search_delay = Some(delay));
    }

    pub fn search_calls(&self, endpoint: &str) -> usize {
        self.with_script(endpoint, |s| s.search_calls)
    }

    pub fn health_calls(&self, endpoint: &str) -> usize {
        self.with_script(endpoint, |s| s.health_calls)
    }
}

#[async_trait]
impl WorkerTransport for ScriptedTransport {
    async fn health(
        &self,
        endpoint: &WorkerEndpoint,
        _timeout: Duration,
    ) -> Result<(), TransportError> {
        self.with_script(endpoint.as_str(), |s| {
            s.health_calls += 1;
            s.health
                .pop_front()
                .or_else(|| s.health_default.clone())
                .unwrap_or(Ok(()))
        })
    }

    async fn search(
        &self,
        endpoint: &WorkerEndpoint,
        _query: &str,
        _timeout: Duration,
    ) -> Result<Vec<String>, TransportError> {
        let (outcome, delay) = self.with_script(endpoint.as_str(), |s| {
            s.search_calls += 1;
            let outcome = s
                .search
                .pop_front()
                .or_else(|| s.search_default.clone())
                .unwrap_or(Ok(Vec::new()));
            (outcome, s.search_delay)
        });

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        outcome
    }
}
