pub mod aggregate;
pub mod chart;
pub mod error;
pub mod map;
pub mod output;

pub use aggregate::aggregate_categories;
pub use chart::{render_chart, Bar, ChartArtifact};
pub use error::RenderError;
pub use map::{marker_color, GeoPoint, MapArtifact, MapMarker, MapRenderer, MarkerColor};
pub use output::{chart_file_name, city_slug, map_file_name, write_artifact};
