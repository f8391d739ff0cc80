// realethio.rs
use crate::config::ScraperConfig;
use crate::domain::{ListingRecord, SortPolicy, Source};
use crate::normalize::{
    absolute_link, clean_text, extract_numeric, price_with_currency, to_float_safe,
};
use crate::scraper::{
    select_attr, select_text, selector, HttpClient, PageCollector, PagePolicy, ScraperError,
    SourceAdapter,
};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

/// Unit markers for the size list item; the second is how "m²" reads when
/// the page is decoded as Latin-1.
const SIZE_MARKERS: [&str; 2] = ["m²", "mÂ²"];

/// Realethio's server-rendered listing pages (`/page/N/` pagination).
pub struct RealethioScraper {
    client: HttpClient,
    listing_url: Url,
}

impl RealethioScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = HttpClient::new(&config.user_agent, config.request_timeout)?;
        let listing_url = Url::parse(&config.endpoints.realethio_listing)
            .map_err(|e| ScraperError::Config(format!("realethio url: {e}")))?;

        Ok(Self {
            client,
            listing_url,
        })
    }

    fn fetch_page(&self, page_url: &str) -> Result<Vec<ListingRecord>, ScraperError> {
        let html = self.client.get_text(page_url, &[])?;
        parse_listing_page(&html, &self.listing_url)
    }
}

impl SourceAdapter for RealethioScraper {
    fn source(&self) -> Source {
        Source::Realethio
    }

    fn scrape(&self, max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        let mut collector = PageCollector::new(Source::Realethio, PagePolicy::SkipPage);

        for page in 1..=max_pages {
            let page_url = page_url(self.listing_url.as_str(), page);
            info!("📄 Realethio page {page}: {page_url}");
            let result = self.fetch_page(&page_url);
            collector.record(&page_url, result);
        }

        collector.finish(SortPolicy::SizeOnly)
    }
}

/// Page 1 is the bare listing URL; later pages append `page/N/`.
pub(crate) fn page_url(base: &str, page: u32) -> String {
    if page > 1 {
        let base = base.trim_end_matches('/');
        format!("{base}/page/{page}/")
    } else {
        base.to_string()
    }
}

struct CardSelectors {
    card: Selector,
    list_item: Selector,
    price: Selector,
    title: Selector,
    address: Selector,
    title_link: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            card: selector(".item-listing-wrap")?,
            list_item: selector("li")?,
            price: selector(".item-price")?,
            title: selector(".item-title")?,
            address: selector(".item-address")?,
            title_link: selector(".item-title a")?,
        })
    }
}

pub(crate) fn parse_listing_page(
    html: &str,
    base: &Url,
) -> Result<Vec<ListingRecord>, ScraperError> {
    let sel = CardSelectors::new()?;
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    for card in document.select(&sel.card) {
        match parse_card(&card, &sel, base) {
            Ok(row) => rows.push(row),
            Err(e) => debug!("Skipping Realethio card: {e}"),
        }
    }
    Ok(rows)
}

fn parse_card(
    card: &ElementRef<'_>,
    sel: &CardSelectors,
    base: &Url,
) -> Result<ListingRecord, ScraperError> {
    let size_text = card
        .select(&sel.list_item)
        .map(|li| li.text().collect::<String>())
        .find_map(|text| {
            SIZE_MARKERS
                .iter()
                .find(|marker| text.contains(*marker))
                .and_then(|marker| text.split(marker).next().map(str::to_string))
        })
        .unwrap_or_else(|| "0".to_string());

    let price_text =
        select_text(card, &sel.price).ok_or(ScraperError::MissingElement(".item-price"))?;
    let title =
        select_text(card, &sel.title).ok_or(ScraperError::MissingElement(".item-title"))?;
    let address =
        select_text(card, &sel.address).ok_or(ScraperError::MissingElement(".item-address"))?;
    let href = select_attr(card, &sel.title_link, "href")
        .ok_or(ScraperError::MissingElement(".item-title a[href]"))?;
    let link =
        absolute_link(base, &href).ok_or(ScraperError::MissingElement(".item-title a[href]"))?;

    Ok(ListingRecord {
        title: clean_text(&title),
        price: price_with_currency("ETB", Some(price_text.replace("ETB", "").as_str())),
        location: clean_text(&address),
        size_sqm: to_float_safe(Some(extract_numeric(&size_text).as_str())),
        source: Source::Realethio,
        link,
    })
}
