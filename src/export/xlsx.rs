use crate::domain::{ListingRecord, LISTING_COLUMNS};
use crate::errors::ExportError;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// One sheet named "Listings" with a bold header row; SizeSqm is written as a number.
pub fn write_listings_xlsx(rows: &[ListingRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Listings")
        .map_err(|e| ExportError::XlsxError(format!("Failed to name sheet: {}", e)))?;

    // Headers
    let bold = Format::new().set_bold();
    for (col, header) in LISTING_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ExportError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, listing) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &listing.title)
            .map_err(|e| ExportError::XlsxError(format!("Failed to write title: {}", e)))?;

        worksheet
            .write_string(r, 1, &listing.price)
            .map_err(|e| ExportError::XlsxError(format!("Failed to write price: {}", e)))?;

        worksheet
            .write_string(r, 2, &listing.location)
            .map_err(|e| ExportError::XlsxError(format!("Failed to write location: {}", e)))?;

        worksheet
            .write_number(r, 3, listing.size_sqm)
            .map_err(|e| ExportError::XlsxError(format!("Failed to write size: {}", e)))?;

        worksheet
            .write_string(r, 4, listing.source.name())
            .map_err(|e| ExportError::XlsxError(format!("Failed to write source: {}", e)))?;

        worksheet
            .write_string(r, 5, &listing.link)
            .map_err(|e| ExportError::XlsxError(format!("Failed to write link: {}", e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| ExportError::XlsxError(format!("Failed to save workbook: {}", e)))
}
