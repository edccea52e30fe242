//! JSON HTTP API for the site's search box and related-content panels.
//!
//! Static pages call these endpoints from the browser and render the
//! results themselves.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/search?q=<query>&limit=<n>` | Keyword search over the catalog |
//! | `GET`  | `/related?url=<url>&limit=<n>` | Pages related to `url` |
//! | `GET`  | `/pages` | The full catalog |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "missing query parameter: q" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so pages served from any
//! host can query the API.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::models::{PageRecord, ScoredResult};
use crate::search::{clamp_limit, SearchIndex};

/// Starts the HTTP server.
///
/// Binds to `[server].bind` and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let index = Arc::new(SearchIndex::from_config(config)?);
    info!(pages = index.catalog().len(), "catalog loaded");

    let app = router(index);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(bind = %config.server.bind, "search API listening");
    println!("Search API listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Route table over a shared index.
pub fn router(index: Arc<SearchIndex>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handle_search))
        .route("/related", get(handle_related))
        .route("/pages", get(handle_pages))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(index)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /search ============

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: Vec<ScoredResult<'a>>,
}

/// Handler for `GET /search`.
///
/// Queries below the minimum length return `200` with no results; only a
/// missing `q` is a client error.
async fn handle_search(
    State(index): State<Arc<SearchIndex>>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;
    let query = params
        .q
        .ok_or_else(|| bad_request("missing query parameter: q"))?;
    let limit = clamp_limit(parse_limit(params.limit)?, index.params().max_results);

    let results = index.search_with_limit(&query, limit);
    let response = Json(SearchResponse {
        query: &query,
        results,
    })
    .into_response();
    Ok(response)
}

// ============ GET /related ============

#[derive(Deserialize)]
struct RelatedQuery {
    url: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize)]
struct RelatedResponse<'a> {
    url: &'a str,
    results: Vec<ScoredResult<'a>>,
}

/// Handler for `GET /related`. Returns `404` when `url` is not in the catalog.
async fn handle_related(
    State(index): State<Arc<SearchIndex>>,
    params: Result<Query<RelatedQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;
    let limit = parse_limit(params.limit)?;
    let url = params
        .url
        .ok_or_else(|| bad_request("missing query parameter: url"))?;

    if index.catalog().find(&url).is_none() {
        return Err(not_found(format!("page not found: {}", url)));
    }

    let limit = clamp_limit(limit, index.related_params().max_results);
    let results = index.related(&url, Some(limit));
    let response = Json(RelatedResponse { url: &url, results }).into_response();
    Ok(response)
}

// ============ GET /pages ============

#[derive(Serialize)]
struct PagesResponse<'a> {
    pages: &'a [PageRecord],
}

async fn handle_pages(State(index): State<Arc<SearchIndex>>) -> Response {
    Json(PagesResponse {
        pages: index.catalog().pages(),
    })
    .into_response()
}

/// Parse the optional `limit` parameter as a non-negative integer.
fn parse_limit(raw: Option<String>) -> Result<Option<usize>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| bad_request(format!("invalid limit: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None).ok(), Some(None));
        assert_eq!(parse_limit(Some("4".to_string())).ok(), Some(Some(4)));
        assert!(parse_limit(Some("abc".to_string())).is_err());
        assert!(parse_limit(Some("-1".to_string())).is_err());
    }
}
