//! Worker Registry
//!
//! Holds the immutable region topology together with the only mutable state
//! shared between the heartbeat loop and the query path: one `WorkerStatus`
//! per (region, endpoint).

use super::types::{
    Region, RegionTopology, WorkerEndpoint, WorkerKey, WorkerStatus, WorkerStatusEntry,
};

use dashmap::DashMap;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Region '{0}' is not recognized.")]
    UnknownRegion(String),

    #[error("worker {0} is not part of the topology")]
    UnknownWorker(WorkerKey),
}

/// Region name -> endpoints and fallback chain. Fixed after startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    regions: BTreeMap<Region, RegionTopology>,
}

impl Topology {
    pub fn new(regions: BTreeMap<Region, RegionTopology>) -> Self {
        Self { regions }
    }

    pub fn region(&self, name: &str) -> Option<&RegionTopology> {
        self.regions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&Region, &RegionTopology)> {
        self.regions.iter()
    }

    /// Every (region, endpoint) pair in region order, then configured endpoint order.
    pub fn worker_keys(&self) -> Vec<WorkerKey> {
        self.regions
            .iter()
            .flat_map(|(region, topo)| {
                topo.endpoints
                    .iter()
                    .map(move |endpoint| WorkerKey::new(region.clone(), endpoint.clone()))
            })
            .collect()
    }
}

pub struct WorkerRegistry {
    topology: Topology,
    statuses: DashMap<WorkerKey, WorkerStatus>,
}

impl WorkerRegistry {
    /// Creates the registry with every worker marked available and never checked.
    pub fn new(topology: Topology) -> Self {
        let statuses = DashMap::new();
        for key in topology.worker_keys() {
            statuses.insert(key, WorkerStatus::default());
        }

        Self { topology, statuses }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.topology.contains(region)
    }

    pub fn endpoints_of(&self, region: &str) -> Result<&[WorkerEndpoint], RegistryError> {
        self.topology
            .region(region)
            .map(|topo| topo.endpoints.as_slice())
            .ok_or_else(|| RegistryError::UnknownRegion(region.to_string()))
    }

    pub fn fallbacks_of(&self, region: &str) -> Result<&[Region], RegistryError> {
        self.topology
            .region(region)
            .map(|topo| topo.fallbacks.as_slice())
            .ok_or_else(|| RegistryError::UnknownRegion(region.to_string()))
    }

    /// Untracked keys report unavailable so they are never dispatched to.
    pub fn is_available(&self, key: &WorkerKey) -> bool {
        self.statuses
            .get(key)
            .map(|status| status.available)
            .unwrap_or(false)
    }

    pub fn status(&self, key: &WorkerKey) -> Option<WorkerStatus> {
        self.statuses.get(key).map(|status| *status)
    }

    /// Marks the worker available and records the check time.
    ///
    /// Returns the availability held before this call so callers can log
    /// transitions exactly once.
    pub fn mark_available(&self, key: &WorkerKey, at_ms: u64) -> Result<bool, RegistryError> {
        let mut status = self
            .statuses
            .get_mut(key)
            .ok_or_else(|| RegistryError::UnknownWorker(key.clone()))?;

        let was_available = status.available;
        status.available = true;
        status.last_checked_ms = Some(at_ms);

        Ok(was_available)
    }

    /// Marks the worker unavailable, returning the previous availability.
    pub fn mark_unavailable(&self, key: &WorkerKey) -> Result<bool, RegistryError> {
        let mut status = self
            .statuses
            .get_mut(key)
            .ok_or_else(|| RegistryError::UnknownWorker(key.clone()))?;

        let was_available = status.available;
        status.available = false;

        Ok(was_available)
    }

    pub fn available_count(&self) -> usize {
        self.statuses.iter().filter(|entry| entry.available).count()
    }

    pub fn worker_count(&self) -> usize {
        self.statuses.len()
    }

    /// Point-in-time copy of every status, in topology order.
    pub fn snapshot(&self) -> Vec<WorkerStatusEntry> {
        self.topology
            .worker_keys()
            .into_iter()
            .filter_map(|key| {
                let status = self.status(&key)?;
                Some(WorkerStatusEntry {
                    region: key.region,
                    endpoint: key.endpoint,
                    available: status.available,
                    last_checked_ms: status.last_checked_ms,
                })
            })
            .collect()
    }
}
