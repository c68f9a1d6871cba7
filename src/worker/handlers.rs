use super::dataset::Dataset;
use crate::transport::protocol::{
    ENDPOINT_HEALTH, ENDPOINT_SEARCH, WorkerErrorResponse, WorkerSearchParams,
    WorkerSearchResponse,
};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(ENDPOINT_SEARCH, get(handle_search))
        .layer(Extension(dataset))
}

pub async fn handle_health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn handle_search(
    Extension(dataset): Extension<Arc<Dataset>>,
    Query(params): Query<WorkerSearchParams>,
) -> Response {
    let query = match params.q.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => q,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(WorkerErrorResponse {
                    error: "Query parameter 'q' is required.".to_string(),
                }),
            )
                .into_response();
        }
    };

    let results = dataset.search(query);
    tracing::info!("Received query {:?}, results: {:?}", query, results);

    (StatusCode::OK, Json(WorkerSearchResponse { results })).into_response()
}
