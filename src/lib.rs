//! Aggregates property listings from several Ethiopian real-estate sites into
//! one normalized dataset.
//!
//! A consumer builds a [`SourceRequest`], hands it to an [`Orchestrator`]
//! created from an [`AdapterRegistry`], and listens for [`PipelineEvent`]s
//! until the final `Finished` event carries the merged rows.

pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod scraper;

#[cfg(test)]
mod tests;

pub use config::ScraperConfig;
pub use domain::{ListingRecord, Source, SourceRequest};
pub use pipeline::{Orchestrator, PipelineEvent, PipelineState};
pub use self::scraper::{AdapterRegistry, SourceAdapter};
