mod report;
mod search;

use std::path::PathBuf;

use bizscope_render::GeoPoint;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "bizscope")]
#[command(about = "Survey Black-owned businesses in a city via the Yelp search API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the businesses found for a city
    List {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Write a bar chart of business counts per category
    Chart {
        #[command(flatten)]
        search: SearchArgs,
        /// Directory for the SVG file (defaults to BIZSCOPE_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write an interactive map with one marker per geocoded business
    Map {
        #[command(flatten)]
        search: SearchArgs,
        /// Fixed map center as "lat,lon" (defaults to the mean business position)
        #[arg(long, value_parser = parse_center, allow_hyphen_values = true)]
        center: Option<GeoPoint>,
        /// Ratings at or above this get green markers (defaults to BIZSCOPE_RATING_THRESHOLD)
        #[arg(long, value_parser = bizscope_core::parse_rating_threshold)]
        threshold: Option<f64>,
        /// Directory for the HTML file (defaults to BIZSCOPE_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Parses `"40.7282,-74.0776"` into a [`GeoPoint`].
fn parse_center(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{raw}\""))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid latitude \"{lat}\": {e}"))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid longitude \"{lon}\": {e}"))?;
    Ok(GeoPoint::new(latitude, longitude))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bizscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::List { search } => report::run_list(&config, &search).await,
        Commands::Chart { search, output_dir } => {
            report::run_chart(&config, &search, output_dir.as_deref()).await
        }
        Commands::Map {
            search,
            center,
            threshold,
            output_dir,
        } => {
            report::run_map(
                &config,
                &search,
                &report::MapOptions {
                    center,
                    threshold,
                    output_dir,
                },
            )
            .await
        }
    }
}
