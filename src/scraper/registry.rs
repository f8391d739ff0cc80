use crate::config::ScraperConfig;
use crate::domain::Source;
use crate::scraper::{
    EthiopiaRealtyScraper, JijiScraper, LivingEthioScraper, RealethioScraper, ScraperError,
    SourceAdapter,
};
use std::collections::HashMap;

/// Maps each `Source` to the adapter that scrapes it. Built once at start-up
/// and handed to the orchestrator.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<Source, Box<dyn SourceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four production adapters.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScraperError> {
        Ok(Self::new()
            .with_adapter(JijiScraper::new(config)?)
            .with_adapter(RealethioScraper::new(config)?)
            .with_adapter(EthiopiaRealtyScraper::new(config)?)
            .with_adapter(LivingEthioScraper::new(config)?))
    }

    /// Registers `adapter` under its own source, replacing any previous one.
    pub fn with_adapter<A: SourceAdapter + 'static>(mut self, adapter: A) -> Self {
        self.adapters.insert(adapter.source(), Box::new(adapter));
        self
    }

    pub fn get(&self, source: Source) -> Option<&dyn SourceAdapter> {
        self.adapters.get(&source).map(|a| a.as_ref())
    }

    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self.adapters.keys().copied().collect();
        sources.sort();
        sources
    }
}
