//! Query Dispatch Module
//!
//! Everything between an accepted query and the workers that answer it.
//!
//! ## Layers
//! - **`client`**: `RetryingClient`, one worker, up to `max_retries` immediate attempts,
//!   each bounded by the request timeout. Exhaustion marks the worker unavailable.
//! - **`region`**: `RegionDispatcher`, parallel fan-out to the available workers of
//!   one region, joined and deduplicated (first-seen wins).
//! - **`fallback`**: `FallbackCoordinator`, primary region first, then the ordered
//!   fallback chain, stopping at the first non-empty answer.
//!
//! Worst-case latency of a request is the sum over every region visited, each
//! bounded by `max_retries x timeout` unless a region deadline is configured.

pub mod client;
pub mod fallback;
pub mod region;
pub mod types;

pub use client::RetryingClient;
pub use fallback::FallbackCoordinator;
pub use region::{RegionDispatcher, merge_unique};
pub use types::{DispatchError, Resolution, ResolutionStatus};
