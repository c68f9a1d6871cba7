//! Worker Registry Module
//!
//! Static region topology plus the live availability table for every worker.
//!
//! ## Core Concepts
//! - **Region**: a named pool of workers with its own ordered fallback chain.
//! - **WorkerKey**: availability is keyed by (region, endpoint), never by endpoint alone.
//! - **Per-key atomicity**: each status update is a single read-modify-write on one
//!   `DashMap` entry; no lock spans more than one worker.

pub mod registry;
pub mod types;

pub use registry::{RegistryError, Topology, WorkerRegistry};
pub use types::{Region, RegionTopology, WorkerEndpoint, WorkerKey, WorkerStatus, WorkerStatusEntry};
