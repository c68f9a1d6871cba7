//! Gateway Module
//!
//! The externally visible surface: one search operation over named regions.
//!
//! ## Responsibilities
//! - **Validation**: `q` and `region` must be present; `region` must be configured.
//! - **Resolution**: delegates to the `FallbackCoordinator`.
//! - **Shaping**: serving region, results, provenance message and fallback flag.
//! - **Errors**: validation failures are 400s, unexpected dispatch faults are 500s;
//!   worker failures never surface here.
//!
//! ## Submodules
//! - **`facade`**: `QueryFacade` and `GatewayError`.
//! - **`handlers`**: Axum handlers for `/search` and `/status`.
//! - **`service`**: assembly of all components from a `GatewayConfig`.
//! - **`types`**: request/response DTOs.

pub mod facade;
pub mod handlers;
pub mod service;
pub mod types;

pub use facade::{GatewayError, QueryFacade};
pub use handlers::router;
pub use service::GatewayService;
