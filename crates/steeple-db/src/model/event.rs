use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::require;

/// A one-time calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl Record for Event {
    const COLLECTION: Collection = Collection::Events;

    fn validate(&self) -> CoreResult<()> {
        require("title", &self.title)
    }
}
