//! Worker Node Module
//!
//! A minimal worker that fulfils the gateway's worker contract: a health probe
//! and a case-insensitive substring search over a fixed in-memory dataset.
//! Backs the `worker-node` binary and the end-to-end tests.

pub mod dataset;
pub mod handlers;

pub use dataset::Dataset;
pub use handlers::router;
