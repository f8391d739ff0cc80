// living_ethio.rs
use crate::config::ScraperConfig;
use crate::domain::{ListingRecord, SortPolicy, Source};
use crate::normalize::{clean_text, json_scalar_text, price_with_currency, to_float_safe};
use crate::scraper::models::LivingEthioProperty;
use crate::scraper::{HttpClient, PageCollector, PagePolicy, ScraperError, SourceAdapter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const PAGE_SIZE: u32 = 100;

/// LivingEthio's counted-pagination JSON API.
///
/// Unlike the other sources this one stops at the first failed request and
/// keeps whatever it collected, and it waits between page requests.
pub struct LivingEthioScraper {
    client: HttpClient,
    api_url: String,
    site: String,
    delay: Duration,
}

/// One decoded page of the API.
#[derive(Debug)]
pub(crate) struct LivingEthioPage {
    pub total_pages: u32,
    /// Raw record count, before records without an area are dropped.
    pub record_count: usize,
    pub rows: Vec<ListingRecord>,
}

impl LivingEthioScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static("https://livingethio.com/"));

        let client = HttpClient::build(
            &config.user_agent,
            config.livingethio_timeout,
            headers,
            true,
        )?;

        Ok(Self {
            client,
            api_url: config.endpoints.livingethio_api.clone(),
            site: config.endpoints.livingethio_site.trim_end_matches('/').to_string(),
            delay: config.livingethio_delay,
        })
    }

    fn fetch_page(&self, page: u32) -> Result<LivingEthioPage, ScraperError> {
        let query = [("page", page.to_string()), ("limit", PAGE_SIZE.to_string())];
        let body = self.client.get_json(&self.api_url, &query)?;
        parse_page(&body, &self.site)
    }
}

impl SourceAdapter for LivingEthioScraper {
    fn source(&self) -> Source {
        Source::LivingEthio
    }

    fn scrape(&self, max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        let mut collector = PageCollector::new(Source::LivingEthio, PagePolicy::StopSource);
        let mut total_pages: Option<u32> = None;
        let mut page = 1;

        while page <= total_pages.unwrap_or(1).min(max_pages) {
            info!("📄 LivingEthio page {page}");

            let parsed = match self.fetch_page(page) {
                Ok(parsed) => parsed,
                Err(e) => {
                    collector.record(&page.to_string(), Err(e));
                    break;
                }
            };

            let bound = *total_pages.get_or_insert(parsed.total_pages);
            let record_count = parsed.record_count;
            collector.record(&page.to_string(), Ok(parsed.rows));

            if record_count == 0 {
                debug!("🏁 LivingEthio page {page} is empty, stopping");
                break;
            }

            page += 1;
            if page <= bound.min(max_pages) {
                std::thread::sleep(self.delay);
            }
        }

        collector.finish(SortPolicy::LocationThenSize)
    }
}

pub(crate) fn parse_page(body: &Value, site: &str) -> Result<LivingEthioPage, ScraperError> {
    if !body.is_object() {
        return Err(ScraperError::UnexpectedShape(
            "livingethio response is not an object".to_string(),
        ));
    }

    let total_pages = body
        .get("totalPages")
        .and_then(Value::as_u64)
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(1);

    let records: &[Value] = body
        .get("records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut rows = Vec::with_capacity(records.len());
    for raw in records {
        let prop: LivingEthioProperty = match serde_json::from_value(raw.clone()) {
            Ok(p) => p,
            Err(e) => {
                debug!("Skipping malformed LivingEthio record: {e}");
                continue;
            }
        };

        if !prop.area.as_ref().is_some_and(is_truthy) {
            continue;
        }

        let id = prop
            .id
            .as_ref()
            .and_then(json_scalar_text)
            .unwrap_or_default();
        let price = prop.price.as_ref().and_then(json_scalar_text);
        let location = prop
            .location
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .unwrap_or("N/A");
        let area = prop.area.as_ref().and_then(json_scalar_text);

        rows.push(ListingRecord {
            title: clean_text(prop.title.as_deref().unwrap_or("N/A")),
            price: price_with_currency("Br.", price.as_deref()),
            location: clean_text(location),
            size_sqm: to_float_safe(area.as_deref()),
            source: Source::LivingEthio,
            link: format!("{site}/site/property-details/{id}"),
        });
    }

    Ok(LivingEthioPage {
        total_pages,
        record_count: records.len(),
        rows,
    })
}

/// Empty strings, zero and null count as "no area".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
