//! Yelp business search response types.
//!
//! Every field is optional: production responses omit `location`,
//! `coordinates` and `image_url` independently, and send `null` for others.
//! A field whose value has the wrong JSON type reads as absent, so one odd
//! field never costs the whole listing. Unknown fields are ignored.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Top-level body of a `GET /v3/businesses/search` response.
///
/// `businesses` stays as raw JSON so one malformed entry can be skipped
/// without rejecting the whole page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub businesses: Option<Vec<Value>>,
    pub total: Option<u64>,
}

/// One business as returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBusiness {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub display_phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<RawLocation>,
    #[serde(deserialize_with = "lenient")]
    pub coordinates: Option<RawCoordinates>,
    /// Entries that are `null` or not category objects are dropped.
    #[serde(deserialize_with = "lenient_list")]
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    #[serde(deserialize_with = "lenient")]
    pub address1: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCoordinates {
    #[serde(deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

/// A category tag; only the display `title` is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// Reads any JSON value and keeps it only if it converts to `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads a JSON array, keeping the elements that convert to `T`. Anything
/// other than an array reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
