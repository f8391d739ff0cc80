use crate::domain::ListingRecord;
use crate::errors::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Array of objects, two-space indent, fields in schema order.
pub fn write_listings_json(rows: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.flush()?;
    Ok(())
}
