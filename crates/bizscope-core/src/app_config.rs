use std::path::PathBuf;

use crate::business::FieldDefault;

/// Process-wide settings, loaded once at startup and handed to each
/// pipeline stage explicitly.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Opaque bearer credential attached to every search request.
    pub yelp_api_key: String,
    pub yelp_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Ratings at or above this value get a green map marker.
    pub rating_threshold: f64,
    /// Placeholder used for missing name/address/city fields.
    pub missing_field_default: FieldDefault,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("yelp_api_key", &"[redacted]")
            .field("yelp_base_url", &self.yelp_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rating_threshold", &self.rating_threshold)
            .field("missing_field_default", &self.missing_field_default)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
