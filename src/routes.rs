use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::fetcher::{FetchError, Fetcher};
use crate::jobs::{self, JobListing};

pub struct AppState {
    pub fetcher: Arc<Fetcher>,
}

/// Errors surfaced to clients as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Job not found")]
    JobNotFound,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::JobNotFound => (StatusCode::NOT_FOUND, "Job not found"),
            ApiError::Fetch(err) => {
                error!("Upstream failure: {err}");
                match err {
                    FetchError::Xml(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to parse XML")
                    }
                    FetchError::Http(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
                    }
                }
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/jobs-arbeitnow", get(arbeitnow))
        .route("/jobs-arbeitnow/:slug", get(arbeitnow_by_slug))
        .route("/jobs-combined", get(combined))
        .route("/jobs-combined/:slug", get(combined_by_slug))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Route handlers

/// The JSON job-board API body, passed through verbatim.
pub async fn arbeitnow(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let body = state.fetcher.arbeitnow_raw().await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn arbeitnow_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let listings = state.fetcher.arbeitnow_listings().await?;
    let job = jobs::find_by_slug(&listings, &slug).ok_or(ApiError::JobNotFound)?;

    Ok(Json(json!({ "data": job })))
}

/// Both sources merged: feed listings first, API listings second.
///
/// The fetches run concurrently; either one failing fails the whole
/// request, so a partial merge is never served.
pub async fn combined(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<JobListing>>, ApiError> {
    let (feed, api_listings) = tokio::try_join!(
        state.fetcher.devitjobs_feed(),
        state.fetcher.arbeitnow_listings(),
    )?;

    Ok(Json(jobs::merge_listings(feed.jobs, api_listings)))
}

pub async fn combined_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let (feed, api_listings) = tokio::try_join!(
        state.fetcher.devitjobs_feed(),
        state.fetcher.arbeitnow_listings(),
    )?;

    let merged = jobs::merge_listings(feed.jobs, api_listings);
    let job = jobs::find_by_slug(&merged, &slug).ok_or(ApiError::JobNotFound)?;

    Ok(Json(json!({ "data": job })))
}

pub async fn health() -> impl IntoResponse {
    "OK"
}
