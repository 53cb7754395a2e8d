use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// No record had both coordinates, so there is nothing to center on.
    #[error("cannot center map: no business has both latitude and longitude")]
    EmptyMap,

    #[error("invalid map center ({latitude}, {longitude})")]
    InvalidCenter { latitude: f64, longitude: f64 },

    #[error("failed to serialize map markers: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
