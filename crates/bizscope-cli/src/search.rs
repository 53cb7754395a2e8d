//! The shared fetch → normalize stage behind every subcommand.

use anyhow::Context;
use bizscope_core::{AppConfig, BusinessRecord, FieldDefault};
use bizscope_yelp::{
    normalize_businesses, RequestBuilder, SearchQuery, SortBy, YelpClient, MAX_PAGE_SIZE,
};
use clap::Args;

/// Search options shared by `list`, `chart` and `map`.
#[derive(Debug, Clone, Args)]
pub(crate) struct SearchArgs {
    /// City and state in the format "city, state_code"
    pub(crate) city: String,
    /// Free-text search term (defaults to "Black owned"; pass "" to omit)
    #[arg(long)]
    pub(crate) term: Option<String>,
    /// Comma-separated category aliases to filter on (e.g. blackowned)
    #[arg(long)]
    pub(crate) categories: Option<String>,
    /// Number of results to request, 1..=50
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    pub(crate) limit: u32,
    /// Result order: rating, review_count or distance
    #[arg(long, default_value = "rating")]
    pub(crate) sort_by: SortBy,
    /// Placeholder for missing text fields: "empty" or "na"
    /// (defaults to BIZSCOPE_MISSING_FIELD_DEFAULT)
    #[arg(long)]
    pub(crate) missing_default: Option<FieldDefault>,
}

impl SearchArgs {
    pub(crate) fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.city.clone())
            .with_categories(self.categories.clone())
            .with_limit(self.limit)
            .with_sort_by(self.sort_by);
        if let Some(term) = &self.term {
            query = query.with_term(Some(term.clone()));
        }
        query
    }
}

/// Builds the request, performs the single search call, and normalizes the
/// listings with one missing-field policy for the whole run.
///
/// # Errors
///
/// Returns an error if the query is invalid, the client cannot be built, or
/// the search does not answer with HTTP 200. No partial results are returned.
pub(crate) async fn fetch_records(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<Vec<BusinessRecord>> {
    let query = args.to_query();
    let builder = RequestBuilder::new(&config.yelp_base_url, &config.yelp_api_key)
        .context("failed to prepare Yelp request builder")?;
    let descriptor = builder
        .build(&query)
        .with_context(|| format!("invalid search for \"{}\"", args.city))?;

    let client = YelpClient::from_config(config).context("failed to build Yelp client")?;
    let raws = client
        .fetch(&descriptor)
        .await
        .with_context(|| format!("business search for \"{}\" failed", args.city))?;

    let missing = args.missing_default.unwrap_or(config.missing_field_default);
    let records = normalize_businesses(raws, missing);
    tracing::info!(
        city = %args.city,
        count = records.len(),
        "fetched business records"
    );
    Ok(records)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
