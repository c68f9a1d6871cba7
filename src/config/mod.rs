//! Gateway Configuration
//!
//! Topology (region -> workers, region -> fallback chain) and the timing knobs
//! of the heartbeat and dispatch paths. Read once from a TOML file at startup.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::{GatewayConfig, RegionConfig};
