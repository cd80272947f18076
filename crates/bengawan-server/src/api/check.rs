use axum::{extract::State, Extension, Json};
use bengawan_scraper::CheckResult;
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

const INVALID_URL_DETAIL: &str = "Invalid KAI URL";

#[derive(Debug, Deserialize)]
pub(super) struct CheckRequest {
    #[serde(default)]
    url: Option<String>,
}

/// `POST /check-availability`: runs one check against the submitted booking
/// URL. Every check outcome is a 200; only a rejected URL is a 400.
pub(super) async fn check_availability(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResult>, ApiError> {
    let url = validate_booking_url(payload.url.as_deref(), &state.allowed_host)
        .inspect_err(|_| tracing::info!(request_id = %req_id.0, "rejected booking url"))?;

    let result = state.checker.check(url).await;
    tracing::info!(
        request_id = %req_id.0,
        success = result.success,
        is_available = result.is_available,
        "availability check finished"
    );
    Ok(Json(result))
}

/// Domain allow-list check: the URL must be present and contain
/// `allowed_host`. Not general URL validation.
fn validate_booking_url<'a>(url: Option<&'a str>, allowed_host: &str) -> Result<&'a str, ApiError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() && url.contains(allowed_host) => Ok(url),
        _ => Err(ApiError::bad_request(INVALID_URL_DETAIL)),
    }
}
