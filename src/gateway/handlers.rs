use super::facade::{GatewayError, QueryFacade};
use super::types::{SearchParams, SearchResponse, StatusResponse};
use crate::registry::WorkerRegistry;

use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/search";
pub const ENDPOINT_STATUS: &str = "/status";

pub fn router(facade: Arc<QueryFacade>, registry: Arc<WorkerRegistry>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_STATUS, get(handle_status))
        .layer(Extension(facade))
        .layer(Extension(registry))
}

pub async fn handle_search(
    Extension(facade): Extension<Arc<QueryFacade>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, GatewayError> {
    let response = facade
        .search(params.q.as_deref(), params.region.as_deref())
        .await?;

    Ok(Json(response))
}

pub async fn handle_status(
    Extension(registry): Extension<Arc<WorkerRegistry>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        available: registry.available_count(),
        total: registry.worker_count(),
        workers: registry.snapshot(),
    })
}
