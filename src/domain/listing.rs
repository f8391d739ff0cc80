use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The four listing providers we know how to scrape.
///
/// Variant order is the order sources are attempted in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Source {
    Jiji,
    Realethio,
    EthiopiaRealty,
    LivingEthio,
}

impl Source {
    pub const ALL: [Source; 4] = [
        Source::Jiji,
        Source::Realethio,
        Source::EthiopiaRealty,
        Source::LivingEthio,
    ];

    /// Identifier used on the command line and in page-count requests.
    pub fn id(self) -> &'static str {
        match self {
            Source::Jiji => "jiji",
            Source::Realethio => "realethio",
            Source::EthiopiaRealty => "ethiopiarealty",
            Source::LivingEthio => "livingethio",
        }
    }

    /// Display name, also the value stored in `ListingRecord::source`.
    pub fn name(self) -> &'static str {
        match self {
            Source::Jiji => "Jiji",
            Source::Realethio => "Realethio",
            Source::EthiopiaRealty => "EthiopiaRealty",
            Source::LivingEthio => "LivingEthio",
        }
    }

    /// Matches ids case-insensitively, ignoring whitespace ("Living Ethio" == "livingethio").
    pub fn from_id(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        Source::ALL.into_iter().find(|s| s.id() == key)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single normalized listing, identical in shape for every source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingRecord {
    pub title: String,
    /// Currency-prefixed and comma-grouped, or the literal "N/A".
    pub price: String,
    pub location: String,
    /// Square metres, 0.0 when unknown.
    pub size_sqm: f64,
    pub source: Source,
    /// Always absolute.
    pub link: String,
}

/// Column headers in schema order, shared by every export format.
pub const LISTING_COLUMNS: [&str; 6] = ["Title", "Price", "Location", "SizeSqm", "Source", "Link"];

/// How an adapter orders its own output before handing it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    LocationThenSize,
    SizeOnly,
}

impl SortPolicy {
    /// Stable sort, so listings with equal keys keep their page order.
    pub fn apply(self, rows: &mut [ListingRecord]) {
        match self {
            SortPolicy::LocationThenSize => rows.sort_by(|a, b| {
                a.location
                    .cmp(&b.location)
                    .then_with(|| cmp_size(a.size_sqm, b.size_sqm))
            }),
            SortPolicy::SizeOnly => rows.sort_by(|a, b| cmp_size(a.size_sqm, b.size_sqm)),
        }
    }
}

fn cmp_size(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
