use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a region, e.g. `europe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Region(pub String);

impl Region {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for Region {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Base URL of a worker node, e.g. `http://localhost:3001`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WorkerEndpoint(pub String);

impl WorkerEndpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins `path` onto the endpoint without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0.trim_end_matches('/'), path)
    }
}

impl fmt::Display for WorkerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkerEndpoint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Availability state is tracked per (region, endpoint); the same URL listed
/// in two regions is two independent workers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerKey {
    pub region: Region,
    pub endpoint: WorkerEndpoint,
}

impl WorkerKey {
    pub fn new(region: impl Into<Region>, endpoint: impl Into<WorkerEndpoint>) -> Self {
        Self {
            region: region.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<String> for WorkerEndpoint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.endpoint, self.region)
    }
}

/// Availability of a single worker.
///
/// Every worker starts as available with no successful check recorded.
/// `last_checked_ms` is the wall-clock time (ms since epoch) of the last
/// successful health probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerStatus {
    pub available: bool,
    pub last_checked_ms: Option<u64>,
}

impl Default for WorkerStatus {
    fn default() -> Self {
        Self {
            available: true,
            last_checked_ms: None,
        }
    }
}

/// One row of the registry snapshot exposed on `/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerStatusEntry {
    pub region: Region,
    pub endpoint: WorkerEndpoint,
    pub available: bool,
    pub last_checked_ms: Option<u64>,
}

/// Configured shape of a single region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTopology {
    pub endpoints: Vec<WorkerEndpoint>,
    pub fallbacks: Vec<Region>,
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
