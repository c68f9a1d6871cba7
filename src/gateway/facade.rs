use super::types::{ErrorResponse, SearchResponse};
use crate::dispatch::{DispatchError, FallbackCoordinator, Resolution, ResolutionStatus};
use crate::registry::WorkerRegistry;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use thiserror::Error;

/// Failures that reach the caller of `/search`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Query parameters 'q' and 'region' are required.")]
    MissingParameters,

    #[error("Region '{0}' is not recognized.")]
    UnknownRegion(String),

    #[error("Error fetching results from region '{region}'.")]
    Dispatch {
        region: String,
        #[source]
        source: DispatchError,
    },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameters | GatewayError::UnknownRegion(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Dispatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::Dispatch { region, source } = &self {
            tracing::error!("Error fetching results from region '{}': {}", region, source);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// The gateway's single query operation.
pub struct QueryFacade {
    registry: Arc<WorkerRegistry>,
    coordinator: Arc<FallbackCoordinator>,
}

impl QueryFacade {
    pub fn new(registry: Arc<WorkerRegistry>, coordinator: Arc<FallbackCoordinator>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }

    /// Validates the request, resolves it through the fallback chain and shapes
    /// the response. Blank values count as missing.
    pub async fn search(
        &self,
        query: Option<&str>,
        region: Option<&str>,
    ) -> Result<SearchResponse, GatewayError> {
        let (query, region) = match (non_blank(query), non_blank(region)) {
            (Some(q), Some(r)) => (q, r),
            _ => return Err(GatewayError::MissingParameters),
        };

        if !self.registry.has_region(region) {
            return Err(GatewayError::UnknownRegion(region.to_string()));
        }

        let resolution = self
            .coordinator
            .resolve(region, query)
            .await
            .map_err(|source| GatewayError::Dispatch {
                region: region.to_string(),
                source,
            })?;

        Ok(shape_response(query, resolution))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn shape_response(query: &str, resolution: Resolution) -> SearchResponse {
    let requested = resolution.requested_region.as_str();
    let serving = resolution.serving_region.as_str();

    let message = match resolution.status {
        ResolutionStatus::Direct => format!("Results fetched from region '{}'.", serving),
        ResolutionStatus::Fallback => format!(
            "Results fetched from fallback region '{}' because region '{}' is unavailable.",
            serving, requested
        ),
        ResolutionStatus::Unavailable => format!(
            "All workers in region '{}' are currently unavailable.",
            requested
        ),
    };

    SearchResponse {
        query: query.to_string(),
        region: serving.to_string(),
        results: resolution.results,
        message,
        used_fallback: resolution.used_fallback,
        status: resolution.status,
    }
}
