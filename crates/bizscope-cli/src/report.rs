//! Subcommand handlers: console listing, category chart, and map.
//!
//! Each handler runs the search once, then renders. A failed search stops
//! the handler before any aggregation or rendering happens.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bizscope_core::{AppConfig, BusinessRecord, CategoryCount};
use bizscope_render::{
    aggregate_categories, chart_file_name, map_file_name, render_chart, write_artifact, GeoPoint,
    MapRenderer,
};

use crate::search::{fetch_records, SearchArgs};

/// Per-run overrides for the `map` subcommand.
#[derive(Debug, Default)]
pub(crate) struct MapOptions {
    pub(crate) center: Option<GeoPoint>,
    pub(crate) threshold: Option<f64>,
    pub(crate) output_dir: Option<PathBuf>,
}

/// Prints a summary line and one row per business.
pub(crate) async fn run_list(config: &AppConfig, search: &SearchArgs) -> anyhow::Result<()> {
    let records = fetch_records(config, search).await?;
    println!("Found {} businesses in {}.", records.len(), search.city);
    if records.is_empty() {
        println!("No results found");
        return Ok(());
    }
    print!("{}", format_listing(&records));
    Ok(())
}

/// Aggregates categories, prints the counts, and writes the SVG chart.
pub(crate) async fn run_chart(
    config: &AppConfig,
    search: &SearchArgs,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    write_chart(config, search, output_dir).await.map(|_| ())
}

/// Returns the path of the written chart, or `None` when the search found
/// nothing.
pub(crate) async fn write_chart(
    config: &AppConfig,
    search: &SearchArgs,
    output_dir: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    let records = fetch_records(config, search).await?;
    println!("Found {} businesses in {}.", records.len(), search.city);
    if records.is_empty() {
        println!("No results found");
        return Ok(None);
    }

    let counts = aggregate_categories(&records);
    print!("{}", format_counts(&counts));

    let title = format!("Black Owned Businesses by Categories in {}", search.city);
    let chart = render_chart(&counts, &title);
    let dir = output_dir.unwrap_or(&config.output_dir);
    let path = write_artifact(dir, &chart_file_name(&search.city), &chart.to_svg())
        .context("failed to save category chart")?;

    println!("Chart saved as {}", path.display());
    Ok(Some(path))
}

/// Renders the marker map and writes it as HTML.
pub(crate) async fn run_map(
    config: &AppConfig,
    search: &SearchArgs,
    options: &MapOptions,
) -> anyhow::Result<()> {
    write_map(config, search, options).await.map(|_| ())
}

/// Returns the path of the written map, or `None` when the search found
/// nothing and no center was supplied. With a center, an empty search still
/// writes a map with no markers.
pub(crate) async fn write_map(
    config: &AppConfig,
    search: &SearchArgs,
    options: &MapOptions,
) -> anyhow::Result<Option<PathBuf>> {
    let records = fetch_records(config, search).await?;
    println!("Found {} businesses in {}.", records.len(), search.city);
    if records.is_empty() {
        println!("No results found");
        // Without a supplied center there is nothing to place the map on.
        if options.center.is_none() {
            return Ok(None);
        }
    }

    let threshold = options.threshold.unwrap_or(config.rating_threshold);
    let artifact = MapRenderer::new(threshold)
        .render(&records, options.center)
        .context("failed to render map")?;
    if artifact.skipped > 0 {
        tracing::warn!(
            skipped = artifact.skipped,
            "businesses without coordinates left off the map"
        );
    }

    let html = artifact
        .to_html(&format!("Black-owned businesses in {}", search.city))
        .context("failed to render map document")?;
    let dir = options.output_dir.as_deref().unwrap_or(&config.output_dir);
    let path = write_artifact(dir, &map_file_name(&search.city), &html)
        .context("failed to save map")?;

    println!("Map saved as {}", path.display());
    Ok(Some(path))
}

fn format_listing(records: &[BusinessRecord]) -> String {
    let mut buf = String::new();
    buf.push_str(&format!(
        "{:<32} {:>6} {:<16} {:<28} {:<16} {}\n",
        "name", "rating", "phone", "address", "city", "categories"
    ));
    for record in records {
        let rating = record
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        buf.push_str(&format!(
            "{:<32} {:>6} {:<16} {:<28} {:<16} {}\n",
            record.name,
            rating,
            record.phone.as_deref().unwrap_or("-"),
            record.address,
            record.city,
            record.categories.join(", ")
        ));
    }
    buf
}

fn format_counts(counts: &[CategoryCount]) -> String {
    let mut buf = String::new();
    for count in counts {
        buf.push_str(&format!("{:<36} {}\n", count.category, count.count));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, categories: &[&str]) -> BusinessRecord {
        BusinessRecord {
            name: name.to_string(),
            rating: Some(4.5),
            phone: Some("(201) 555-0100".to_string()),
            address: "1 Main St".to_string(),
            city: "Jersey City".to_string(),
            latitude: None,
            longitude: None,
            image_url: None,
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[test]
    fn format_listing_has_header_and_rows() {
        let out = format_listing(&[record("Sweet Chick", &["Southern", "Bars"])]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("name"));
        assert!(lines[1].starts_with("Sweet Chick"));
        assert!(lines[1].contains("4.5"));
        assert!(lines[1].ends_with("Southern, Bars"));
    }

    #[test]
    fn format_counts_one_line_per_category() {
        let counts = vec![
            CategoryCount {
                category: "Bakery".to_string(),
                count: 2,
            },
            CategoryCount {
                category: "Cafe".to_string(),
                count: 1,
            },
        ];
        let out = format_counts(&counts);
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("Bakery"));
        assert!(out.lines().next().unwrap().ends_with('2'));
    }
}
