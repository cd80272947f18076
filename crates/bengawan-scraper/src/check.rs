//! One-shot availability check for the target train.
//!
//! [`AvailabilityChecker::check`] runs fetch → split into cards → match the
//! target → classify seats → extract details, stopping at the first matching
//! card. Every outcome, transport failures included, comes back as a
//! [`CheckResult`]; nothing is raised to the caller.

use bengawan_core::AppConfig;
use serde::Serialize;

use crate::availability::{classify_seat_text, seat_text};
use crate::cards::{CardBoundary, TrainTarget};
use crate::client::PageClient;
use crate::error::ScraperError;
use crate::extract::{extract_train_details, TrainDetails};
use crate::headers::HeaderPool;

const ICON_AVAILABLE: &str = "🟢";
const ICON_UNAVAILABLE: &str = "🔴";

/// Outcome of a single check, serialized as the `/check-availability`
/// response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub success: bool,
    pub is_available: bool,
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TrainReport>,
}

/// Details of the matched listing card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainReport {
    pub name: String,
    pub status_text: String,
    #[serde(flatten)]
    pub details: TrainDetails,
}

impl CheckResult {
    fn failed(logs: Vec<String>) -> Self {
        Self {
            success: false,
            is_available: false,
            logs,
            data: None,
        }
    }

    fn not_found(logs: Vec<String>) -> Self {
        Self {
            success: true,
            is_available: false,
            logs,
            data: None,
        }
    }
}

pub struct AvailabilityChecker {
    client: PageClient,
    headers: HeaderPool,
    boundary: CardBoundary,
    target: TrainTarget,
}

impl std::fmt::Debug for AvailabilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityChecker")
            .field("target", &self.target.name())
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

impl AvailabilityChecker {
    #[must_use]
    pub fn new(
        client: PageClient,
        headers: HeaderPool,
        boundary: CardBoundary,
        target: TrainTarget,
    ) -> Self {
        Self {
            client,
            headers,
            boundary,
            target,
        }
    }

    /// Builds a checker with random browser headers from application config.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidPattern`] — `card_pattern` does not compile.
    /// - [`ScraperError::BlankTrainName`] — `target_train` is blank.
    /// - [`ScraperError::Http`] — the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let boundary = match config.card_pattern.as_deref() {
            Some(pattern) => CardBoundary::from_pattern(pattern)?,
            None => CardBoundary::default(),
        };
        Ok(Self::new(
            PageClient::new(config.request_timeout_secs)?,
            HeaderPool::default(),
            boundary,
            TrainTarget::new(&config.target_train)?,
        ))
    }

    #[must_use]
    pub fn target(&self) -> &TrainTarget {
        &self.target
    }

    /// Fetches `url` once and reports on the target train.
    pub async fn check(&self, url: &str) -> CheckResult {
        let mut logs = vec![format!(
            "[{}] Checking status...",
            chrono::Local::now().format("%H:%M:%S")
        )];
        tracing::info!(url, train = self.target.name(), "checking availability");

        let headers = self.headers.pick();
        let page = match self.client.fetch_page(url, &headers).await {
            Ok(page) => page,
            Err(ScraperError::UnexpectedStatus { status, .. }) => {
                tracing::warn!(url, status, "booking page returned non-200 status");
                logs.push(format!("Error: HTTP {status}"));
                return CheckResult::failed(logs);
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "booking page fetch failed");
                logs.push(format!("System Error: {e}"));
                return CheckResult::failed(logs);
            }
        };

        self.inspect_page(&page, logs)
    }

    /// Scans an already-fetched page, appending to `logs`.
    fn inspect_page(&self, page: &str, mut logs: Vec<String>) -> CheckResult {
        let name = self.target.name();
        let cards = self.boundary.split(page);
        tracing::debug!(cards = cards.len(), "split booking page into listing cards");

        if cards.is_empty() {
            logs.push("No train listings found in this page.".to_string());
            return CheckResult::not_found(logs);
        }

        let Some(card) = cards.into_iter().find(|card| self.target.matches(card)) else {
            tracing::info!(train = name, "target train not listed");
            logs.push(format!("Train {name} not found in this page."));
            return CheckResult::not_found(logs);
        };

        let details = extract_train_details(card);
        let status = classify_seat_text(seat_text(card));
        let is_available = status.is_available();
        let status_text = status.status_text();

        let icon = if is_available {
            ICON_AVAILABLE
        } else {
            ICON_UNAVAILABLE
        };
        logs.push(format!("{icon} {name}: {status_text}"));
        tracing::info!(train = name, is_available, status = %status_text, "target train found");

        if is_available {
            logs.push(format!(
                "   Price: {}",
                details.price.as_deref().unwrap_or("N/A")
            ));
            logs.push("   GO BOOK NOW!".to_string());
        }

        CheckResult {
            success: true,
            is_available,
            logs,
            data: Some(TrainReport {
                name: name.to_string(),
                status_text,
                details,
            }),
        }
    }
}
