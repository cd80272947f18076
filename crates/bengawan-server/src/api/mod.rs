mod check;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bengawan_scraper::AvailabilityChecker;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<AvailabilityChecker>,
    /// Substring a submitted booking URL must contain.
    pub allowed_host: Arc<str>,
}

/// Client-facing error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HomeData {
    status: &'static str,
    mode: &'static str,
}

/// CORS policy allowing exactly one frontend origin, with credentials.
///
/// # Errors
///
/// Fails if `origin` is not a valid header value.
pub fn build_cors(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid FRONTEND_ORIGIN \"{origin}\""))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/check-availability", post(check::check_availability))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn home() -> impl IntoResponse {
    Json(HomeData {
        status: "alive",
        mode: "serverless",
    })
}
