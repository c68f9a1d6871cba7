//! Region-Federated Search Gateway Library
//!
//! This library crate defines the modules behind the gateway binary (`main.rs`)
//! and the reference worker binary (`bin/worker_node.rs`).
//!
//! ## Architecture Modules
//! A query flows gateway -> dispatch -> transport -> worker, while the health
//! monitor runs beside it and mutates the same registry the dispatcher reads.
//!
//! - **`config`**: TOML configuration: regions, worker endpoints, fallback chains,
//!   heartbeat period, request timeout and retry bound.
//! - **`registry`**: The static topology and the per-(region, endpoint) availability
//!   table shared by the heartbeat and query paths.
//! - **`health`**: The heartbeat loop. Probes every worker in parallel each period and
//!   flips availability, logging only on transitions.
//! - **`dispatch`**: Retrying per-worker client, parallel per-region fan-out with
//!   deduplication, and ordered cross-region fallback.
//! - **`transport`**: The worker contract (`/health`, `/search`) as a trait, with the
//!   HTTP implementation used in production.
//! - **`gateway`**: The public `/search` operation: validation, response shaping and
//!   error mapping.
//! - **`worker`**: A reference worker node serving a substring search over an
//!   in-memory dataset.

pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod health;
pub mod registry;
pub mod transport;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;
