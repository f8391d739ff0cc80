// errors.rs
use thiserror::Error;

/// Problems with user input or runtime configuration. Raised before any
/// network activity so a bad request never launches a partial run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown source: {0}")]
    UnknownSource(String),
    #[error("Invalid page count for {source_id}: {value:?}")]
    InvalidPageCount { source_id: String, value: String },
    #[error("Expected SOURCE=PAGES, got {0:?}")]
    MalformedPair(String),
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

/// Errors from the orchestrator itself, never from an individual source.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("A scrape is already running")]
    AlreadyRunning,
    #[error("Failed to start scraper thread: {0}")]
    Spawn(String),
}

/// Errors writing the merged dataset to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XLSX error: {0}")]
    XlsxError(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
