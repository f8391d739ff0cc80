mod csv;
mod json;
mod xlsx;

pub use csv::write_listings_csv;
pub use json::write_listings_json;
pub use xlsx::write_listings_xlsx;

use crate::domain::ListingRecord;
use crate::errors::ExportError;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

impl ExportFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Writes the merged dataset to `path` in the format its extension names.
pub fn export_listings(rows: &[ListingRecord], path: &Path) -> Result<ExportFormat, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Csv => write_listings_csv(rows, path)?,
        ExportFormat::Xlsx => write_listings_xlsx(rows, path)?,
        ExportFormat::Json => write_listings_json(rows, path)?,
    }

    info!(path = %path.display(), rows = rows.len(), "💾 Exported {format:?}");
    Ok(format)
}
