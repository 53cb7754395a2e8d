//! Interactive map of geocoded business records.
//!
//! [`MapRenderer::render`] turns records into a [`MapArtifact`] (center plus
//! one marker per geocoded record); [`MapArtifact::to_html`] writes that out
//! as a standalone Leaflet document with CartoDB Positron tiles.

use bizscope_core::BusinessRecord;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::error::RenderError;

pub const DEFAULT_ZOOM_START: u8 = 13;
pub const POPUP_MAX_WIDTH_PX: u32 = 300;
pub const POPUP_IMAGE_SIZE_PX: u32 = 150;

const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn is_on_globe(self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Green,
    Blue,
}

impl MarkerColor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
        }
    }
}

/// Green when `rating >= threshold`, blue otherwise (including no rating).
#[must_use]
pub fn marker_color(rating: Option<f64>, threshold: f64) -> MarkerColor {
    match rating {
        Some(r) if r >= threshold => MarkerColor::Green,
        _ => MarkerColor::Blue,
    }
}

/// One map pin. `tooltip` and `popup_html` are already HTML-escaped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: MarkerColor,
    pub tooltip: String,
    pub popup_html: String,
}

/// A rendered map: where it is centered and what it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapArtifact {
    pub center: GeoPoint,
    pub zoom_start: u8,
    pub markers: Vec<MapMarker>,
    /// Records left off the map for lack of coordinates.
    pub skipped: usize,
}

/// Renders business records as map markers.
///
/// The rating threshold that separates green from blue markers is an
/// explicit setting: use `4.0` for "well rated" maps or `4.9` to highlight
/// only top-rated listings.
#[derive(Debug, Clone, Copy)]
pub struct MapRenderer {
    threshold: f64,
}

impl MapRenderer {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Builds the map for `records`.
    ///
    /// Records missing either coordinate are skipped. When `center` is
    /// `None` the map is centered on the mean latitude/longitude of the
    /// geocoded records.
    ///
    /// # Errors
    ///
    /// - [`RenderError::EmptyMap`] if `center` is `None` and no record has
    ///   coordinates.
    /// - [`RenderError::InvalidCenter`] if a supplied center is off the globe.
    pub fn render(
        &self,
        records: &[BusinessRecord],
        center: Option<GeoPoint>,
    ) -> Result<MapArtifact, RenderError> {
        let markers: Vec<MapMarker> = records
            .iter()
            .filter_map(|record| {
                let (latitude, longitude) = record.coordinates()?;
                Some(MapMarker {
                    latitude,
                    longitude,
                    color: marker_color(record.rating, self.threshold),
                    tooltip: encode_text(&record.name).into_owned(),
                    popup_html: popup_html(record),
                })
            })
            .collect();
        let skipped = records.len() - markers.len();

        let center = match center {
            Some(point) if point.is_on_globe() => point,
            Some(point) => {
                return Err(RenderError::InvalidCenter {
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
            }
            None => mean_center(&markers).ok_or(RenderError::EmptyMap)?,
        };

        tracing::debug!(
            markers = markers.len(),
            skipped,
            threshold = self.threshold,
            "rendered map markers"
        );

        Ok(MapArtifact {
            center,
            zoom_start: DEFAULT_ZOOM_START,
            markers,
            skipped,
        })
    }
}

/// Arithmetic mean of marker positions; `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
fn mean_center(markers: &[MapMarker]) -> Option<GeoPoint> {
    if markers.is_empty() {
        return None;
    }
    let n = markers.len() as f64;
    let latitude = markers.iter().map(|m| m.latitude).sum::<f64>() / n;
    let longitude = markers.iter().map(|m| m.longitude).sum::<f64>() / n;
    Some(GeoPoint::new(latitude, longitude))
}

fn popup_html(record: &BusinessRecord) -> String {
    let rating = record
        .rating
        .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"));

    let mut html = format!(
        "<b>{}</b><br>Rating: {rating}<br>Address: {}",
        encode_text(&record.name),
        encode_text(&record.address),
    );
    if !record.categories.is_empty() {
        html.push_str("<br>Category: ");
        html.push_str(&encode_text(&record.categories.join(", ")));
    }
    if let Some(url) = &record.image_url {
        html.push_str(&format!(
            "<br><img src=\"{}\" width=\"{POPUP_IMAGE_SIZE_PX}\" height=\"{POPUP_IMAGE_SIZE_PX}\">",
            encode_double_quoted_attribute(url)
        ));
    }
    html
}

impl MapArtifact {
    /// Writes the map as a self-contained Leaflet HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialize`] if the marker list cannot be
    /// encoded as JSON.
    pub fn to_html(&self, title: &str) -> Result<String, RenderError> {
        // "</" inside an inline script would end the script element early.
        let markers_json = serde_json::to_string(&self.markers)?.replace("</", "<\\/");

        let mut buf = String::new();
        buf.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        buf.push_str("<meta charset=\"utf-8\">\n");
        buf.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        buf.push_str(&format!("<title>{}</title>\n", encode_text(title)));
        buf.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css\">\n"
        ));
        buf.push_str(&format!(
            "<script src=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js\"></script>\n"
        ));
        buf.push_str("<style>html, body, #map { height: 100%; margin: 0; }</style>\n");
        buf.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

        buf.push_str(&format!(
            "const map = L.map(\"map\").setView([{:.6}, {:.6}], {});\n",
            self.center.latitude, self.center.longitude, self.zoom_start
        ));
        buf.push_str(&format!(
            "L.tileLayer(\"{TILE_URL}\", {{ attribution: {}, subdomains: \"abcd\", maxZoom: 20 }}).addTo(map);\n",
            serde_json::to_string(TILE_ATTRIBUTION)?.replace("</", "<\\/")
        ));
        buf.push_str(&format!("const markers = {markers_json};\n"));
        buf.push_str("for (const m of markers) {\n");
        buf.push_str(
            "  L.circleMarker([m.latitude, m.longitude], { radius: 9, color: m.color, fillColor: m.color, fillOpacity: 0.8 })\n",
        );
        buf.push_str(&format!(
            "    .bindPopup(m.popup_html, {{ maxWidth: {POPUP_MAX_WIDTH_PX} }})\n"
        ));
        buf.push_str("    .bindTooltip(m.tooltip)\n");
        buf.push_str("    .addTo(map);\n");
        buf.push_str("}\n</script>\n</body>\n</html>\n");

        Ok(buf)
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
