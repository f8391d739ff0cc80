// src/domain/request.rs

use crate::domain::listing::Source;
use crate::errors::ConfigError;
use std::collections::BTreeMap;

/// Requested page count per source. A count of 0 means "skip this source".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRequest {
    pages: BTreeMap<Source, u32>,
}

impl SourceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, source: Source, pages: u32) -> Self {
        self.pages.insert(source, pages);
        self
    }

    /// Builds a request from raw user input, e.g. `[("jiji", "3"), ("Living Ethio", "")]`.
    ///
    /// Empty text counts as 0. Unknown ids and anything that is not a
    /// non-negative integer are rejected before a run can start.
    pub fn from_inputs<'a, I>(inputs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::new();

        for (id, text) in inputs {
            let source =
                Source::from_id(id).ok_or_else(|| ConfigError::UnknownSource(id.to_string()))?;

            let text = text.trim();
            let pages = if text.is_empty() {
                0
            } else {
                text.parse::<u32>()
                    .map_err(|_| ConfigError::InvalidPageCount {
                        source_id: source.id().to_string(),
                        value: text.to_string(),
                    })?
            };

            request.pages.insert(source, pages);
        }

        Ok(request)
    }

    /// Parses `source=count` pairs as given on the command line.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, ConfigError> {
        let mut split = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let pair = pair.as_ref();
            let (id, count) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedPair(pair.to_string()))?;
            split.push((id, count));
        }
        Self::from_inputs(split)
    }

    pub fn pages_for(&self, source: Source) -> u32 {
        self.pages.get(&source).copied().unwrap_or(0)
    }

    /// Sources with a non-zero page count, in attempt order.
    pub fn enabled(&self) -> Vec<(Source, u32)> {
        self.pages
            .iter()
            .filter(|(_, &pages)| pages > 0)
            .map(|(&source, &pages)| (source, pages))
            .collect()
    }
}
