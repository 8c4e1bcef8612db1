//! HTTP API: routing, handlers and error responses.
//!
//! # Routes
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/api/search` | `{keywords, domains}` | `{results: [NewsItem]}` |
//! | `GET` | `/health` | | `{status: "ok"}` |
//!
//! # Error Contract
//!
//! Upstream failures never produce an error response; they only shrink the
//! result list. Anything else that stops a search is reported as
//! `{"error": "<message>"}` together with a non-2xx status:
//! - `400 Bad Request` when the body is not a `{keywords, domains}` object
//! - `500 Internal Server Error` when the search task itself fails
//!
//! # CORS
//!
//! With no configured origins every origin, method and header is allowed. That
//! is a development stance; production deployments should pass
//! `--cors-origin` to narrow it.

use crate::errors::ConfigError;
use crate::fetch::FetchPage;
use crate::models::{ErrorResponse, HealthStatus, SearchRequest, SearchResponse};
use crate::pipeline::NewsSearch;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, instrument, warn};

/// Failures that escape the search pipeline and reach the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Search failed: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router around a configured search pipeline.
pub fn router<F>(search: Arc<NewsSearch<F>>, cors: CorsLayer) -> Router
where
    F: FetchPage + Send + Sync + 'static,
{
    Router::new()
        .route("/api/search", post(search_news::<F>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(search)
}

/// CORS policy: permissive when `origins` is empty, otherwise an exact-origin list.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    if origins.is_empty() {
        warn!("CORS allows any origin; pass --cors-origin to restrict it");
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// `POST /api/search`
///
/// The search runs on its own task so that a panic anywhere in the pipeline
/// comes back as a `500` with an `error` body instead of a dropped connection.
#[instrument(level = "info", skip_all)]
async fn search_news<F>(
    State(search): State<Arc<NewsSearch<F>>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError>
where
    F: FetchPage + Send + Sync + 'static,
{
    let Json(request) = payload.inspect_err(|e| warn!(error = %e, "Rejected search body"))?;

    let results = tokio::spawn(async move { search.search(&request).await })
        .await
        .inspect_err(|e| error!(error = %e, "Search task failed"))?;

    Ok(Json(SearchResponse { results }))
}

/// `GET /health`
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
