pub mod listing;
pub mod request;

pub use listing::{ListingRecord, SortPolicy, Source, LISTING_COLUMNS};
pub use request::SourceRequest;
