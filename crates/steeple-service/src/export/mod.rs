//! Export of record selections to PDF, Word and CSV.
//!
//! Records are first mapped to an [`ExportDocument`], a format-neutral list
//! of headed entries with labelled fields. Each encoder renders that document
//! into a complete in-memory artifact; nothing reaches the caller unless the
//! whole artifact encoded.
//!
//! ## Module Organization
//!
//! - `docx`: WordprocessingML package written with `zip` and `quick-xml`
//! - `entries`: record-to-entry mapping, including anonymity masking
//! - `pdf`: paginated A4 document written with `lopdf`
//! - `service`: loading a collection selection, encoding and logging the export
//! - `tabular`: CSV written with `csv`

use chrono::NaiveDate;
use serde::Deserialize;

use steeple_core::error::CoreError;

use crate::error::{ServiceError, ServiceResult};

pub mod docx;
pub mod entries;
pub mod pdf;
pub mod service;
pub mod tabular;


pub use entries::Exportable;
pub use service::{ExportArtifact, export_collection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Word,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "word" | "docx" => Ok(Self::Word),
            "csv" => Ok(Self::Csv),
            other => Err(CoreError::InvalidInput(format!(
                "unsupported export format: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: String,
    /// Printed under the title when set.
    pub generated_on: Option<NaiveDate>,
}

/// One labelled value in an exported entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportField {
    pub label: &'static str,
    pub value: String,
}

/// One exported record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportEntry {
    pub heading: String,
    pub fields: Vec<ExportField>,
}

impl ExportEntry {
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field unless the value is blank.
    #[must_use]
    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.push(ExportField { label, value });
        }
        self
    }

    #[must_use]
    pub fn optional(self, label: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    #[must_use]
    pub fn flag(self, label: &'static str, value: bool) -> Self {
        self.field(label, if value { "Yes" } else { "No" })
    }
}

/// Format-neutral content of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub subtitle: Option<String>,
    /// Column name given to entry headings in tabular formats.
    pub heading_label: &'static str,
    pub entries: Vec<ExportEntry>,
}

impl ExportDocument {
    #[must_use]
    pub fn from_records<T: Exportable>(records: &[T], options: &ExportOptions) -> Self {
        Self {
            title: options.title.clone(),
            subtitle: options
                .generated_on
                .map(|date| format!("Generated {}", date.format("%B %-d, %Y"))),
            heading_label: T::HEADING_LABEL,
            entries: records.iter().map(Exportable::export_entry).collect(),
        }
    }
}

/// ## Summary
/// Encodes records in the requested format.
///
/// ## Errors
/// Returns `ExportFailed` if the encoder fails; no partial output is returned.
#[tracing::instrument(skip(records, options), fields(records = records.len(), %format))]
pub fn export_records<T: Exportable>(
    records: &[T],
    format: ExportFormat,
    options: &ExportOptions,
) -> ServiceResult<Vec<u8>> {
    let document = ExportDocument::from_records(records, options);
    let bytes = match format {
        ExportFormat::Pdf => pdf::render(&document),
        ExportFormat::Word => docx::render(&document),
        ExportFormat::Csv => tabular::render(&document),
    }?;

    tracing::debug!(bytes = bytes.len(), "Export encoded");
    Ok(bytes)
}

pub(crate) fn export_failed(format: ExportFormat, error: impl std::fmt::Display) -> ServiceError {
    ServiceError::ExportFailed(format!("{format}: {error}"))
}
