use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::{CoreError, CoreResult};

use super::validate::require;
use super::{Record, default_true};

/// Highest valid `day_of_week` (Saturday); Sunday is 0.
pub const MAX_DAY_OF_WEEK: u8 = 6;

/// A weekly-recurring calendar template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringEventDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    /// Free-form `HH:MM`; not ordered against `end_time`.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for RecurringEventDefinition {
    const COLLECTION: Collection = Collection::RecurringEvents;

    fn validate(&self) -> CoreResult<()> {
        require("title", &self.title)?;
        if self.day_of_week > MAX_DAY_OF_WEEK {
            return Err(CoreError::ValidationError(format!(
                "dayOfWeek must be between 0 and {MAX_DAY_OF_WEEK}, got {}",
                self.day_of_week
            )));
        }
        Ok(())
    }
}

/// An admin override cancelling one occurrence date.
///
/// `recurring_event_id` is informational only; nothing enforces that the
/// definition still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipException {
    pub recurring_event_id: uuid::Uuid,
    pub skip_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Record for SkipException {
    const COLLECTION: Collection = Collection::SkippedRecurringEvents;
}
