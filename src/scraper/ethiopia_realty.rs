// ethiopia_realty.rs
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
use tracing::{debug, info, warn};
use url::Url;

/// EthiopiaRealty: pagination links are discovered from the first index page,
/// then each discovered page is fetched on its own.
pub struct EthiopiaRealtyScraper {
    client: HttpClient,
    site: Url,
    default_page: String,
}

impl EthiopiaRealtyScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = HttpClient::new(&config.user_agent, config.request_timeout)?;
        let site = Url::parse(&config.endpoints.ethiopiarealty_site)
            .map_err(|e| ScraperError::Config(format!("ethiopiarealty url: {e}")))?;
        let default_page = site
            .join(&config.endpoints.ethiopiarealty_listing_path)
            .map_err(|e| ScraperError::Config(format!("ethiopiarealty listing path: {e}")))?
            .to_string();

        Ok(Self {
            client,
            site,
            default_page,
        })
    }

    /// Falls back to the default listing page when the index cannot be fetched
    /// or carries no pagination.
    fn page_links(&self, max_pages: u32) -> Vec<String> {
        let discovered = self
            .client
            .get_text(&self.default_page, &[])
            .and_then(|html| discover_page_links(&html, &self.site, max_pages as usize));

        match discovered {
            Ok(links) if !links.is_empty() => links,
            Ok(_) => {
                debug!("No pagination found, using default page");
                vec![self.default_page.clone()]
            }
            Err(e) => {
                warn!("⚠️ EthiopiaRealty page discovery failed: {e}");
                vec![self.default_page.clone()]
            }
        }
    }

    fn fetch_page(&self, page_url: &str) -> Result<Vec<ListingRecord>, ScraperError> {
        let html = self.client.get_text(page_url, &[])?;
        parse_listing_blocks(&html, &self.site)
    }
}

impl SourceAdapter for EthiopiaRealtyScraper {
    fn source(&self) -> Source {
        Source::EthiopiaRealty
    }

    fn scrape(&self, max_pages: u32) -> Result<Vec<ListingRecord>, ScraperError> {
        let mut collector = PageCollector::new(Source::EthiopiaRealty, PagePolicy::SkipPage);

        for page_url in self.page_links(max_pages) {
            info!("📄 EthiopiaRealty page: {page_url}");
            let result = self.fetch_page(&page_url);
            collector.record(&page_url, result);
        }

        collector.finish(SortPolicy::SizeOnly)
    }
}

/// Absolute URLs of the first `max_pages` distinct pagination links.
pub(crate) fn discover_page_links(
    html: &str,
    site: &Url,
    max_pages: usize,
) -> Result<Vec<String>, ScraperError> {
    let link_sel = selector(".pagination a.page-link")?;
    let document = Html::parse_document(html);

    let mut links: Vec<String> = Vec::new();
    for a in document.select(&link_sel) {
        if links.len() >= max_pages {
            break;
        }
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        if let Some(link) = absolute_link(site, href) {
            if !links.contains(&link) {
                links.push(link);
            }
        }
    }
    Ok(links)
}

struct BlockSelectors {
    block: Selector,
    size: Selector,
    price: Selector,
    title: Selector,
    address: Selector,
    title_link: Selector,
}

impl BlockSelectors {
    fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            block: selector("div.d-flex.align-items-center.h-100")?,
            size: selector(".hz-figure")?,
            price: selector(".item-price")?,
            title: selector(".item-title")?,
            address: selector(".item-address")?,
            title_link: selector(".item-title a")?,
        })
    }
}

pub(crate) fn parse_listing_blocks(
    html: &str,
    site: &Url,
) -> Result<Vec<ListingRecord>, ScraperError> {
    let sel = BlockSelectors::new()?;
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    for block in document.select(&sel.block) {
        match parse_block(&block, &sel, site) {
            Ok(row) => rows.push(row),
            Err(e) => debug!("Skipping EthiopiaRealty listing: {e}"),
        }
    }
    Ok(rows)
}

fn parse_block(
    block: &ElementRef<'_>,
    sel: &BlockSelectors,
    site: &Url,
) -> Result<ListingRecord, ScraperError> {
    let size_text = select_text(block, &sel.size).unwrap_or_else(|| "0".to_string());
    let price_text =
        select_text(block, &sel.price).ok_or(ScraperError::MissingElement(".item-price"))?;
    let title =
        select_text(block, &sel.title).ok_or(ScraperError::MissingElement(".item-title"))?;
    let address =
        select_text(block, &sel.address).ok_or(ScraperError::MissingElement(".item-address"))?;
    let href = select_attr(block, &sel.title_link, "href")
        .ok_or(ScraperError::MissingElement(".item-title a[href]"))?;
    let link =
        absolute_link(site, &href).ok_or(ScraperError::MissingElement(".item-title a[href]"))?;

    Ok(ListingRecord {
        title: clean_text(&title),
        price: price_with_currency("ETB", Some(price_text.as_str())),
        location: clean_text(&address.replace(" ,", ",")),
        size_sqm: to_float_safe(Some(extract_numeric(&size_text).as_str())),
        source: Source::EthiopiaRealty,
        link,
    })
}
