//! Artifact file naming and writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Fixed tag appended to every map file name.
pub const MAP_FILE_TAG: &str = "black_owned_businesses_map2";
pub const CHART_FILE_TAG: &str = "categories_chart";

/// File-name stem for a `"city, state_code"` string: `", "` becomes `"_"`.
///
/// Path separators are replaced as well so the stem always names a file in
/// the output directory.
#[must_use]
pub fn city_slug(city: &str) -> String {
    city.trim().replace(", ", "_").replace(['/', '\\'], "_")
}

/// `"Jersey City, NJ"` → `"Jersey City_NJ_black_owned_businesses_map2.html"`.
#[must_use]
pub fn map_file_name(city: &str) -> String {
    format!("{}_{MAP_FILE_TAG}.html", city_slug(city))
}

#[must_use]
pub fn chart_file_name(city: &str) -> String {
    format!("{}_{CHART_FILE_TAG}.svg", city_slug(city))
}

/// Writes `contents` to `dir/file_name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub fn write_artifact(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_file_name_replaces_comma_space() {
        assert_eq!(
            map_file_name("Jersey City, NJ"),
            "Jersey City_NJ_black_owned_businesses_map2.html"
        );
        assert_eq!(
            map_file_name("Atlanta, GA"),
            "Atlanta_GA_black_owned_businesses_map2.html"
        );
    }

    #[test]
    fn chart_file_name_uses_same_slug() {
        assert_eq!(chart_file_name("Newark, NJ"), "Newark_NJ_categories_chart.svg");
    }

    #[test]
    fn city_slug_strips_path_separators() {
        assert_eq!(city_slug("../etc, XX"), ".._etc_XX");
    }

    #[test]
    fn write_artifact_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("maps");
        let path = write_artifact(&dir, "out.html", "<html></html>").unwrap();
        assert_eq!(path, dir.join("out.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn write_artifact_reports_io_error_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        // A regular file cannot act as a directory.
        let err = write_artifact(&blocker, "out.html", "x").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }), "{err:?}");
    }
}
