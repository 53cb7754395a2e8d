use thiserror::Error;

/// Errors returned while building or issuing a Yelp business search.
#[derive(Debug, Error)]
pub enum YelpError {
    /// The search query was rejected before any network call.
    #[error("invalid search query: {reason}")]
    InvalidQuery { reason: String },

    /// The search endpoint answered with anything other than HTTP 200.
    #[error("Yelp search failed with HTTP {status_code}: {body_text}")]
    Fetch { status_code: u16, body_text: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 200 response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The API key cannot be carried in an HTTP header.
    #[error("invalid API credential: {0}")]
    InvalidCredential(String),
}
