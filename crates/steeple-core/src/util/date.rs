//! Calendar date helpers shared by the occurrence generator and the API.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date.
///
/// ## Errors
/// Returns `InvalidInput` if the text is not a valid calendar date.
pub fn parse_date(text: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| CoreError::InvalidInput(format!("invalid date '{text}': {e}")))
}
