//! Health Monitoring Module
//!
//! Heartbeat loop that keeps worker availability fresh independently of query
//! traffic.
//!
//! ## Core Mechanisms
//! - **Parallel probes**: every worker is probed concurrently each cycle, each call
//!   bounded by the request timeout.
//! - **Single-shot decisions**: one failed probe flips a worker to unavailable; one
//!   successful probe brings it back. Retries belong to the query path only.
//! - **Edge-triggered logging**: "unavailable" and "recovered" are logged on the
//!   transition, not on every cycle of a sustained outage.
//! - **Explicit lifecycle**: `HealthMonitor::start` returns a `MonitorHandle` that
//!   stops the loop.

pub mod monitor;

pub use monitor::{HealthMonitor, MonitorHandle, ProbeOutcome};
