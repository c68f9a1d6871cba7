//! Worker Wire Protocol
//!
//! Paths and payloads every worker node exposes. Shared by the gateway's HTTP
//! transport and the reference worker in `crate::worker`.

use serde::{Deserialize, Serialize};

// --- Worker Endpoints ---

/// Liveness probe. Any 2xx means healthy; the body is ignored.
pub const ENDPOINT_HEALTH: &str = "/health";
/// Local search over the worker's shard, query string `q`.
pub const ENDPOINT_SEARCH: &str = "/search";

// --- Data Transfer Objects ---

/// Query string of a worker search call.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerSearchParams {
    pub q: Option<String>,
}

/// Body of a successful worker search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerSearchResponse {
    pub results: Vec<String>,
}

/// Body of a rejected worker request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerErrorResponse {
    pub error: String,
}
