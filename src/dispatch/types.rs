use crate::registry::Region;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Region '{0}' is not recognized.")]
    UnknownRegion(String),

    /// A fan-out task panicked or was cancelled outside the deadline path.
    #[error("worker task in region '{region}' failed: {source}")]
    WorkerTask {
        region: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// How a query ended up being served.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// The requested region answered.
    Direct,
    /// A region from the fallback chain answered.
    Fallback,
    /// Neither the region nor any fallback produced results.
    Unavailable,
}

/// Result of walking a region's fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub requested_region: Region,
    pub serving_region: Region,
    pub results: Vec<String>,
    pub used_fallback: bool,
    pub status: ResolutionStatus,
}
