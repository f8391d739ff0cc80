use crate::domain::{ListingRecord, LISTING_COLUMNS};
use crate::errors::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Comma-separated, header row first, no index column.
pub fn write_listings_csv(rows: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "{}", LISTING_COLUMNS.join(","))?;
    for row in rows {
        let fields = [
            escape(&row.title),
            escape(&row.price),
            escape(&row.location),
            format_size(row.size_sqm),
            escape(row.source.name()),
            escape(&row.link),
        ];
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()?;
    Ok(())
}

/// RFC 4180 quoting: only fields containing a comma, quote or line break are quoted.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Whole sizes keep one decimal ("120.0") so the column reads as a float.
pub(crate) fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{size:.1}")
    } else {
        size.to_string()
    }
}
