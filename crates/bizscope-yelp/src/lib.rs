pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod request;
pub mod types;

pub use client::YelpClient;
pub use error::YelpError;
pub use normalize::{normalize_business, normalize_businesses};
pub use query::{SearchQuery, SortBy, DEFAULT_TERM, MAX_PAGE_SIZE};
pub use request::{RequestBuilder, RequestDescriptor};
pub use types::{RawBusiness, RawCategory, RawCoordinates, RawLocation, SearchResponse};
