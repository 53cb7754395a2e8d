//! Search parameters for the Yelp business search endpoint.

use std::fmt;
use std::str::FromStr;

/// Largest page the search endpoint will return in one response.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Free-text term used when the caller does not supply one.
pub const DEFAULT_TERM: &str = "Black owned";

/// Result ordering accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Rating,
    ReviewCount,
    Distance,
}

impl SortBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Rating => "rating",
            SortBy::ReviewCount => "review_count",
            SortBy::Distance => "distance",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(SortBy::Rating),
            "review_count" | "review-count" => Ok(SortBy::ReviewCount),
            "distance" => Ok(SortBy::Distance),
            other => Err(format!(
                "unknown sort order \"{other}\" (expected rating, review_count or distance)"
            )),
        }
    }
}

/// One business search, immutable once built.
///
/// Validation of `location` and `limit` happens in
/// [`RequestBuilder::build`](crate::RequestBuilder::build) so a query can be
/// assembled field by field without intermediate errors.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    location: String,
    term: Option<String>,
    categories: Option<String>,
    limit: u32,
    sort_by: SortBy,
}

impl SearchQuery {
    /// Creates a query for `location` (e.g. `"Jersey City, NJ"`) using the
    /// default term, a full page of results, and rating order.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            term: Some(DEFAULT_TERM.to_string()),
            categories: None,
            limit: MAX_PAGE_SIZE,
            sort_by: SortBy::default(),
        }
    }

    /// Replaces the search term; `None` drops the `term` parameter entirely.
    #[must_use]
    pub fn with_term(mut self, term: Option<String>) -> Self {
        self.term = term;
        self
    }

    /// Sets the comma-separated category alias filter (e.g. `"blackowned"`).
    #[must_use]
    pub fn with_categories(mut self, categories: Option<String>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    #[must_use]
    pub fn categories(&self) -> Option<&str> {
        self.categories.as_deref()
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_query_uses_defaults() {
        let query = SearchQuery::new("Jersey City, NJ");
        assert_eq!(query.location(), "Jersey City, NJ");
        assert_eq!(query.term(), Some("Black owned"));
        assert_eq!(query.categories(), None);
        assert_eq!(query.limit(), 50);
        assert_eq!(query.sort_by(), SortBy::Rating);
    }

    #[test]
    fn builder_methods_replace_fields() {
        let query = SearchQuery::new("Newark, NJ")
            .with_term(None)
            .with_categories(Some("blackowned".to_string()))
            .with_limit(10)
            .with_sort_by(SortBy::Distance);
        assert_eq!(query.term(), None);
        assert_eq!(query.categories(), Some("blackowned"));
        assert_eq!(query.limit(), 10);
        assert_eq!(query.sort_by(), SortBy::Distance);
    }

    #[test]
    fn sort_by_round_trips_through_str() {
        for sort in [SortBy::Rating, SortBy::ReviewCount, SortBy::Distance] {
            assert_eq!(sort.as_str().parse::<SortBy>(), Ok(sort));
        }
    }

    #[test]
    fn sort_by_rejects_unknown() {
        assert!("best_match".parse::<SortBy>().is_err());
    }
}
