use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;

pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Workers and fallback chain of one region, as written in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionConfig {
    pub workers: Vec<String>,
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

/// Gateway configuration.
///
/// Loaded from TOML; everything except `regions` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Period of the heartbeat loop.
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,

    /// Bound applied to every outbound call, health probe or search attempt.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Search attempts per worker per query.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Optional cap on one region's fan-out. Unset means wait for every worker.
    #[serde(default)]
    pub region_deadline_ms: Option<u64>,

    pub regions: BTreeMap<String, RegionConfig>,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_heartbeat_interval_ms() -> u64 {
    DEFAULT_HEARTBEAT_INTERVAL_MS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn region(workers: &[&str], fallbacks: &[&str]) -> RegionConfig {
    RegionConfig {
        workers: workers.iter().map(|w| w.to_string()).collect(),
        fallbacks: fallbacks.iter().map(|f| f.to_string()).collect(),
    }
}

impl Default for GatewayConfig {
    /// Three local regions that fall back to each other in a ring.
    fn default() -> Self {
        let mut regions = BTreeMap::new();
        regions.insert(
            "europe".to_string(),
            region(&["http://localhost:3001", "http://localhost:3004"], &["asia"]),
        );
        regions.insert(
            "asia".to_string(),
            region(&["http://localhost:3002"], &["gulf"]),
        );
        regions.insert(
            "gulf".to_string(),
            region(&["http://localhost:3003"], &["europe"]),
        );

        Self {
            bind: default_bind(),
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            region_deadline_ms: None,
            regions,
        }
    }
}
