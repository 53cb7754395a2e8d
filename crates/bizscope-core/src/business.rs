//! Flat business records produced by normalization and the category counts
//! derived from them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder written into text columns whose source field was absent.
///
/// One policy applies to a whole pipeline run so every record in a result
/// set uses the same placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefault {
    /// Missing text becomes `""`.
    #[default]
    Empty,
    /// Missing text becomes `"N/A"`.
    NotAvailable,
}

impl FieldDefault {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldDefault::Empty => "",
            FieldDefault::NotAvailable => "N/A",
        }
    }
}

impl FromStr for FieldDefault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "" => Ok(FieldDefault::Empty),
            "na" | "n/a" | "not_available" => Ok(FieldDefault::NotAvailable),
            other => Err(format!(
                "unknown missing-field default \"{other}\" (expected \"empty\" or \"na\")"
            )),
        }
    }
}

/// One business listing after normalization.
///
/// `latitude` and `longitude` are either both `Some` or both `None`;
/// `categories` holds category titles in provider order and is empty when
/// the listing had none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    /// Star rating in `0.0..=5.0`.
    pub rating: Option<f64>,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
}

impl BusinessRecord {
    /// Returns `(latitude, longitude)` when the record is geocoded.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Number of listings carrying a given category title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}
