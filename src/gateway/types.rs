//! Gateway API payloads.

use crate::dispatch::ResolutionStatus;
use crate::registry::WorkerStatusEntry;

use serde::{Deserialize, Serialize};

/// `GET /search?q=..&region=..`. Both are optional here so that their absence
/// can be reported with the gateway's own error body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub query: String,
    /// Region that actually served the results.
    pub region: String,
    pub results: Vec<String>,
    pub message: String,
    pub used_fallback: bool,
    pub status: ResolutionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub available: usize,
    pub total: usize,
    pub workers: Vec<WorkerStatusEntry>,
}
