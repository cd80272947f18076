use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ScraperError;
use crate::headers::BrowserHeaders;

/// Plain GET transport for booking pages.
///
/// Never retries. Anything other than `200 OK` is reported as
/// [`ScraperError::UnexpectedStatus`] and the response is dropped unread.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` with `headers` and returns the body text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any status other than 200.
    /// - [`ScraperError::Http`] — connection failure, timeout, or an
    ///   unreadable body.
    pub async fn fetch_page(
        &self,
        url: &str,
        headers: &BrowserHeaders,
    ) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .headers(headers.to_header_map())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
