mod client;
pub(crate) mod ethiopia_realty;
pub(crate) mod jiji;
pub(crate) mod living_ethio;
mod models;
pub(crate) mod realethio;
mod registry;
mod scraper_error;

pub use client::HttpClient;
pub use ethiopia_realty::EthiopiaRealtyScraper;
pub use jiji::JijiScraper;
pub use living_ethio::LivingEthioScraper;
pub use realethio::RealethioScraper;
pub use registry::AdapterRegistry;
pub use scraper_error::ScraperError;

use crate::domain::{ListingRecord, SortPolicy, Source};
use scraper::{ElementRef, Selector};
use tracing::warn;

/// One listing source. Implementations own their HTTP client and apply the
/// field normalizers to every record they emit.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Scrapes up to `max_pages` pages. Page- and listing-level failures are
    /// absorbed according to the source's `PagePolicy`; `Err` means nothing
    /// could be fetched at all.
    fn scrape(&self, max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError>;
}

/// What a failed page does to the rest of the scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePolicy {
    /// Skip the failed page, carry on with the next one.
    SkipPage,
    /// Stop the source, keep what was collected so far.
    StopSource,
}

/// Per-invocation accumulation buffer shared by all adapters.
pub(crate) struct PageCollector {
    source: Source,
    policy: PagePolicy,
    rows: Vec<ListingRecord>,
    attempted: usize,
    failed: usize,
    last_error: Option<ScraperError>,
}

impl PageCollector {
    pub(crate) fn new(source: Source, policy: PagePolicy) -> Self {
        Self {
            source,
            policy,
            rows: Vec::new(),
            attempted: 0,
            failed: 0,
            last_error: None,
        }
    }

    /// Records one page result. Returns `false` when the page loop must stop.
    pub(crate) fn record(
        &mut self,
        page: &str,
        result: Result<Vec<ListingRecord>, ScraperError>,
    ) -> bool {
        self.attempted += 1;
        match result {
            Ok(mut rows) => {
                self.rows.append(&mut rows);
                true
            }
            Err(e) => {
                self.failed += 1;
                match self.policy {
                    PagePolicy::SkipPage => {
                        warn!(source = %self.source, page, "⚠️ Page skipped: {e}");
                        self.last_error = Some(e);
                        true
                    }
                    PagePolicy::StopSource => {
                        warn!(
                            source = %self.source,
                            page,
                            kept = self.rows.len(),
                            "❌ Request failed, stopping source: {e}"
                        );
                        self.last_error = Some(e);
                        false
                    }
                }
            }
        }
    }

    /// Sorts and returns the collected rows. Fails only if every attempted page failed.
    pub(crate) fn finish(self, sort: SortPolicy) -> Result<Vec<ListingRecord>, ScraperError> {
        if self.attempted > 0 && self.failed == self.attempted && self.rows.is_empty() {
            if let Some(e) = self.last_error {
                return Err(e);
            }
        }

        let mut rows = self.rows;
        sort.apply(&mut rows);
        Ok(rows)
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(format!("{css}: {e}")))
}

/// Concatenated text of the first element matching `sel`.
pub(crate) fn select_text(el: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(|e| e.text().collect::<String>())
}

pub(crate) fn select_attr(el: &ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    el.select(sel)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(str::to_string)
}
