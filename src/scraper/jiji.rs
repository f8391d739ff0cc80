// jiji.rs
use crate::config::ScraperConfig;
use crate::domain::{ListingRecord, SortPolicy, Source};
use crate::normalize::{
    absolute_link, clean_text, extract_numeric, json_scalar_text, price_with_currency,
    to_float_safe,
};
use crate::scraper::models::JijiAdvert;
use crate::scraper::{HttpClient, PageCollector, PagePolicy, ScraperError, SourceAdapter};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const CATEGORY_SLUG: &str = "houses-apartments-for-sale";
const PROPERTY_TYPE: &str = "House";
const SIZE_ATTR: &str = "Property size";

/// Jiji's JSON listing API, one request per page number.
pub struct JijiScraper {
    client: HttpClient,
    api_url: String,
    site: Url,
}

impl JijiScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = HttpClient::new(&config.user_agent, config.request_timeout)?;
        let site = Url::parse(&config.endpoints.jiji_site)
            .map_err(|e| ScraperError::Config(format!("jiji site url: {e}")))?;

        Ok(Self {
            client,
            api_url: config.endpoints.jiji_api.clone(),
            site,
        })
    }

    fn fetch_page(&self, page: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        let query = [
            ("slug", CATEGORY_SLUG.to_string()),
            ("webp", "true".to_string()),
            ("filter_attr_188_property_type", PROPERTY_TYPE.to_string()),
            ("page", page.to_string()),
        ];

        let body = self.client.get_json(&self.api_url, &query)?;
        parse_adverts(&body, &self.site)
    }
}

impl SourceAdapter for JijiScraper {
    fn source(&self) -> Source {
        Source::Jiji
    }

    fn scrape(&self, max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        let mut collector = PageCollector::new(Source::Jiji, PagePolicy::SkipPage);

        for page in 1..=max_pages {
            info!("📄 Jiji page {page}/{max_pages}");
            let result = self.fetch_page(page);
            collector.record(&page.to_string(), result);
        }

        collector.finish(SortPolicy::LocationThenSize)
    }
}

/// Parses one API response. A missing `adverts_list` is treated as an empty page;
/// adverts that fail to deserialize are skipped individually.
pub(crate) fn parse_adverts(body: &Value, site: &Url) -> Result<Vec<ListingRecord>, ScraperError> {
    if !body.is_object() {
        return Err(ScraperError::UnexpectedShape(
            "jiji response is not an object".to_string(),
        ));
    }

    let Some(adverts) = body["adverts_list"]["adverts"].as_array() else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::with_capacity(adverts.len());
    for raw in adverts {
        let advert: JijiAdvert = match serde_json::from_value(raw.clone()) {
            Ok(a) => a,
            Err(e) => {
                debug!("Skipping malformed Jiji advert: {e}");
                continue;
            }
        };

        match advert_to_record(&advert, site) {
            Some(row) => rows.push(row),
            None => debug!("Skipping Jiji advert with unusable link: {:?}", advert.url),
        }
    }

    Ok(rows)
}

fn advert_to_record(advert: &JijiAdvert, site: &Url) -> Option<ListingRecord> {
    let size_value = advert
        .attrs
        .iter()
        .find(|attr| attr.name.as_deref() == Some(SIZE_ATTR))
        .and_then(|attr| attr.value.as_ref())
        .and_then(json_scalar_text)
        .unwrap_or_else(|| "0".to_string());

    let price = advert
        .price_obj
        .as_ref()
        .and_then(|p| p.value.as_ref())
        .and_then(json_scalar_text);

    let link = absolute_link(site, advert.url.as_deref().unwrap_or(""))?;

    Some(ListingRecord {
        title: clean_text(advert.title.as_deref().unwrap_or("N/A")),
        price: price_with_currency("ETB", price.as_deref()),
        location: clean_text(advert.region_name.as_deref().unwrap_or("N/A")),
        size_sqm: to_float_safe(Some(extract_numeric(&size_value).as_str())),
        source: Source::Jiji,
        link,
    })
}
