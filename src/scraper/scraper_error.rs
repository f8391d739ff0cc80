use thiserror::Error;

/// Failures at the adapter boundary.
///
/// `Network`, `Status` and `JsonParse` describe a whole page (or request);
/// `MissingElement` describes a single listing card and only ever causes that
/// card to be skipped.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Adapter panicked")]
    Panicked,
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        ScraperError::Network(e.to_string())
    }
}
