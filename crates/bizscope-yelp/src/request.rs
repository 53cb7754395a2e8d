//! Construction of fully-formed search requests.
//!
//! [`RequestBuilder`] holds the endpoint and credential so that building a
//! request from a [`SearchQuery`] is a pure function: no I/O, no global
//! state, same input gives the same URL and headers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;

use crate::error::YelpError;
use crate::query::{SearchQuery, MAX_PAGE_SIZE};

/// A ready-to-send search request: target URL plus headers.
///
/// The `Authorization` header is marked sensitive, so `Debug` output never
/// contains the credential.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: Url,
    pub headers: HeaderMap,
}

/// Builds [`RequestDescriptor`]s for one endpoint and credential.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: Url,
    authorization: HeaderValue,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url.as_str())
            .field("authorization", &"[redacted]")
            .finish()
    }
}

impl RequestBuilder {
    /// Creates a builder for the search endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`YelpError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   `http`/`https` URL.
    /// - [`YelpError::InvalidCredential`] if `api_key` contains bytes that
    ///   cannot appear in a header value.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, YelpError> {
        let parsed = Url::parse(base_url).map_err(|e| YelpError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(YelpError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| YelpError::InvalidCredential(e.to_string()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            base_url: parsed,
            authorization,
        })
    }

    /// Produces the request for `query`.
    ///
    /// Free-text values are form-encoded (`"Jersey City, NJ"` becomes
    /// `Jersey+City%2C+NJ`). Absent or empty `term`/`categories` are left
    /// out of the query string.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::InvalidQuery`] if the location is blank or the
    /// limit is outside `1..=50`.
    pub fn build(&self, query: &SearchQuery) -> Result<RequestDescriptor, YelpError> {
        if query.location().trim().is_empty() {
            return Err(YelpError::InvalidQuery {
                reason: "location must not be empty".to_string(),
            });
        }
        if !(1..=MAX_PAGE_SIZE).contains(&query.limit()) {
            return Err(YelpError::InvalidQuery {
                reason: format!(
                    "limit {} is outside 1..={MAX_PAGE_SIZE}",
                    query.limit()
                ),
            });
        }

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("location", query.location());
            if let Some(term) = query.term().filter(|t| !t.is_empty()) {
                pairs.append_pair("term", term);
            }
            if let Some(categories) = query.categories().filter(|c| !c.is_empty()) {
                pairs.append_pair("categories", categories);
            }
            pairs.append_pair("limit", &query.limit().to_string());
            pairs.append_pair("sort_by", query.sort_by().as_str());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());

        Ok(RequestDescriptor { url, headers })
    }
}
