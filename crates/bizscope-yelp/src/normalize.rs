//! Normalization of raw Yelp listings into [`BusinessRecord`]s.
//!
//! Normalization never fails. Each absent or null nested field falls back to
//! a documented default: text columns use the run's [`FieldDefault`],
//! coordinates collapse to `None` unless both axes are usable, and
//! categories become an empty list.

use bizscope_core::{BusinessRecord, FieldDefault};

use crate::types::{RawBusiness, RawCoordinates};

/// Converts one [`RawBusiness`] into a [`BusinessRecord`].
#[must_use]
pub fn normalize_business(raw: RawBusiness, missing: FieldDefault) -> BusinessRecord {
    let text_or_default = |value: Option<String>| -> String {
        value.unwrap_or_else(|| missing.as_str().to_string())
    };

    let (address, city) = match raw.location {
        Some(location) => (
            text_or_default(location.address1),
            text_or_default(location.city),
        ),
        None => (text_or_default(None), text_or_default(None)),
    };

    let (latitude, longitude) = raw.coordinates.and_then(valid_coordinates).unzip();

    let categories = raw
        .categories
        .into_iter()
        .filter_map(|category| category.title)
        .filter(|title| !title.trim().is_empty())
        .collect();

    BusinessRecord {
        name: text_or_default(raw.name.filter(|n| !n.trim().is_empty())),
        rating: raw.rating.filter(|r| (0.0..=5.0).contains(r)),
        phone: raw.display_phone.filter(|p| !p.trim().is_empty()),
        address,
        city,
        latitude,
        longitude,
        // Yelp sends "" for listings without a photo.
        image_url: raw.image_url.filter(|u| !u.trim().is_empty()),
        categories,
    }
}

/// Normalizes a whole page of results, preserving provider order.
#[must_use]
pub fn normalize_businesses(raws: Vec<RawBusiness>, missing: FieldDefault) -> Vec<BusinessRecord> {
    let records: Vec<BusinessRecord> = raws
        .into_iter()
        .map(|raw| normalize_business(raw, missing))
        .collect();

    let geocoded = records
        .iter()
        .filter(|r| r.coordinates().is_some())
        .count();
    tracing::debug!(
        total = records.len(),
        geocoded,
        "normalized business records"
    );

    records
}

/// Keeps a coordinate pair only when both axes are present and on the globe.
fn valid_coordinates(coordinates: RawCoordinates) -> Option<(f64, f64)> {
    let (latitude, longitude) = coordinates.latitude.zip(coordinates.longitude)?;
    let on_globe = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    on_globe.then_some((latitude, longitude))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
