//! HTTP client for the Yelp business search endpoint.
//!
//! Issues exactly one GET per call. Only HTTP 200 counts as success; any
//! other status surfaces as [`YelpError::Fetch`] with the response body and
//! is never retried.

use std::time::Duration;

use bizscope_core::AppConfig;
use reqwest::{Client, StatusCode};

use crate::error::YelpError;
use crate::request::RequestDescriptor;
use crate::types::{RawBusiness, SearchResponse};

/// Client for the Yelp business search endpoint.
pub struct YelpClient {
    client: Client,
}

impl YelpClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, YelpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, YelpError> {
        Self::new(config.request_timeout_secs, &config.user_agent)
    }

    /// Sends the search request and returns the listings it found.
    ///
    /// A 200 body without a `businesses` key (or with `null`) yields an
    /// empty list. Entries of `businesses` that cannot be read as a
    /// [`RawBusiness`] (anything but a JSON object) are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`YelpError::Fetch`] for any status other than 200.
    /// - [`YelpError::Http`] on network failure.
    /// - [`YelpError::Deserialize`] if a 200 body is not a JSON object or
    ///   `businesses` is not an array.
    pub async fn fetch(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Vec<RawBusiness>, YelpError> {
        tracing::debug!(url = %descriptor.url, "sending business search");

        let response = self
            .client
            .get(descriptor.url.clone())
            .headers(descriptor.headers.clone())
            .send()
            .await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                "business search returned non-200 status"
            );
            return Err(YelpError::Fetch {
                status_code: status.as_u16(),
                body_text,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| YelpError::Deserialize {
                context: format!("business search response from {}", descriptor.url.path()),
                source: e,
            })?;

        if let Some(total) = parsed.total {
            tracing::info!(total, "search reports total matching businesses");
        }

        Ok(Self::read_businesses(parsed))
    }

    /// Converts the raw `businesses` array, skipping unreadable entries.
    fn read_businesses(parsed: SearchResponse) -> Vec<RawBusiness> {
        let Some(entries) = parsed.businesses else {
            tracing::info!("search response has no businesses key");
            return Vec::new();
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, value)| match serde_json::from_value::<RawBusiness>(value) {
                    Ok(business) => Some(business),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "skipping malformed business entry");
                        None
                    }
                },
            )
            .collect()
    }
}
