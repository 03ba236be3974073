use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use steeple_db::model::Document;
use steeple_db::model::event::Event;

use super::occurrence::GeneratedOccurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Event,
    Recurring,
}

/// A row of the combined calendar: a one-time event or a generated occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<uuid::Uuid>,
}

impl From<&Document<Event>> for CalendarEntry {
    fn from(event: &Document<Event>) -> Self {
        Self {
            id: event.id.to_string(),
            kind: EntryKind::Event,
            title: event.data.title.clone(),
            description: event.data.description.clone(),
            location: event.data.location.clone(),
            date: event.data.date,
            start_time: event.data.start_time.clone(),
            end_time: event.data.end_time.clone(),
            definition_id: None,
        }
    }
}

impl From<GeneratedOccurrence> for CalendarEntry {
    fn from(occurrence: GeneratedOccurrence) -> Self {
        Self {
            id: occurrence.synthetic_id,
            kind: EntryKind::Recurring,
            title: occurrence.title,
            description: occurrence.description,
            location: occurrence.location,
            date: occurrence.date,
            start_time: Some(occurrence.start_time).filter(|t| !t.is_empty()),
            end_time: Some(occurrence.end_time).filter(|t| !t.is_empty()),
            definition_id: Some(occurrence.definition_id),
        }
    }
}

/// Start times are free-form, so they are compared as clock times when they
/// read as `H:MM` or `HH:MM` and otherwise sort like a missing time.
fn start_key(start_time: Option<&str>) -> Option<NaiveTime> {
    start_time.and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
}

/// ## Summary
/// Merges one-time events with generated occurrences, ascending by date and
/// then start time.
///
/// The sort is stable: entries on the same date and time keep events before
/// occurrences, each in input order. Entries without a readable start time
/// sort first within their day.
#[must_use]
pub fn combined_calendar(
    events: &[Document<Event>],
    occurrences: Vec<GeneratedOccurrence>,
) -> Vec<CalendarEntry> {
    let mut entries: Vec<CalendarEntry> = events
        .iter()
        .map(CalendarEntry::from)
        .chain(occurrences.into_iter().map(CalendarEntry::from))
        .collect();

    entries.sort_by_cached_key(|entry| (entry.date, start_key(entry.start_time.as_deref())));
    entries
}
