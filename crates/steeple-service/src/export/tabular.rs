//! CSV rendering: one row per entry, one column per field label.

use super::{ExportDocument, ExportFormat, export_failed};
use crate::error::ServiceResult;

fn columns(document: &ExportDocument) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for field in document.entries.iter().flat_map(|entry| &entry.fields) {
        if !labels.contains(&field.label) {
            labels.push(field.label);
        }
    }
    labels
}

/// ## Summary
/// Renders the document as CSV with a header row. Fields an entry lacks are
/// left empty.
///
/// ## Errors
/// Returns `ExportFailed` if a row cannot be written.
pub fn render(document: &ExportDocument) -> ServiceResult<Vec<u8>> {
    let fail = |e: csv::Error| export_failed(ExportFormat::Csv, e);
    let labels = columns(document);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(std::iter::once(document.heading_label).chain(labels.iter().copied()))
        .map_err(fail)?;

    for entry in &document.entries {
        let row = labels.iter().map(|label| {
            entry
                .fields
                .iter()
                .find(|field| field.label == *label)
                .map_or("", |field| field.value.as_str())
        });
        writer
            .write_record(std::iter::once(entry.heading.as_str()).chain(row))
            .map_err(fail)?;
    }

    writer
        .into_inner()
        .map_err(|e| export_failed(ExportFormat::Csv, e.error()))
}
