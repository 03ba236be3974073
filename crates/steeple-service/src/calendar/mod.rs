//! Recurring events and the combined calendar.
//!
//! ## Module Organization
//!
//! - `clock`: the source of "today" (configured time zone, or fixed for tests)
//! - `combined`: merge of one-time events and generated occurrences
//! - `occurrence`: the pure occurrence generator

use chrono::NaiveDate;

use steeple_db::model::Document;
use steeple_db::model::activity::{ActivityAction, ActivityLogEntry};
use steeple_db::model::event::Event;
use steeple_db::model::recurring::{RecurringEventDefinition, SkipException};
use steeple_db::store::DocumentStore;
use steeple_db::store::repository::Repository;

use crate::error::{ServiceError, ServiceResult};
use crate::record::activity::log_activity;

pub mod clock;
pub mod combined;
pub mod occurrence;


pub use clock::{Clock, FixedClock, SystemClock};
pub use combined::{CalendarEntry, EntryKind, combined_calendar};
pub use occurrence::{GeneratedOccurrence, definition_id_for, generate_occurrences};

/// ## Summary
/// Loads definitions and skip exceptions, then generates occurrences.
///
/// ## Errors
/// Returns store errors, or `InvalidDefinition` for a stored definition with a
/// bad weekday.
#[tracing::instrument(skip(store))]
pub async fn load_occurrences(
    store: &dyn DocumentStore,
    weeks_ahead: u32,
    today: NaiveDate,
) -> ServiceResult<Vec<GeneratedOccurrence>> {
    let definitions = Repository::<RecurringEventDefinition>::new(store);
    let skips = Repository::<SkipException>::new(store);

    let (definitions, skips) = futures::try_join!(definitions.list(None), skips.list(None))?;
    generate_occurrences(&definitions, &skips, weeks_ahead, today)
}

/// ## Summary
/// Builds the combined calendar: every one-time event on or after `today`
/// plus the generated occurrences for the window.
///
/// ## Errors
/// Same as [`load_occurrences`].
#[tracing::instrument(skip(store))]
pub async fn load_calendar(
    store: &dyn DocumentStore,
    weeks_ahead: u32,
    today: NaiveDate,
) -> ServiceResult<Vec<CalendarEntry>> {
    let events = Repository::<Event>::new(store);
    let (events, occurrences) = futures::try_join!(
        async { events.list(None).await.map_err(ServiceError::from) },
        load_occurrences(store, weeks_ahead, today)
    )?;

    let upcoming: Vec<Document<Event>> = events
        .into_iter()
        .filter(|event| event.data.date >= today)
        .collect();
    Ok(combined_calendar(&upcoming, occurrences))
}

/// ## Summary
/// Cancels one occurrence of a recurring event by recording a skip exception.
///
/// ## Side Effects
/// Writes a `skipped` activity entry.
///
/// ## Errors
/// Returns `NotFound` if the definition does not exist.
#[tracing::instrument(skip(store, reason))]
pub async fn skip_occurrence(
    store: &dyn DocumentStore,
    definition_id: uuid::Uuid,
    date: NaiveDate,
    reason: Option<String>,
    actor: &str,
) -> ServiceResult<Document<SkipException>> {
    Repository::<RecurringEventDefinition>::new(store)
        .require(definition_id)
        .await?;

    let skip = Repository::<SkipException>::new(store)
        .create(&SkipException {
            recurring_event_id: definition_id,
            skip_date: date,
            reason,
        })
        .await?;
    tracing::info!(%definition_id, %date, "Occurrence skipped");

    log_activity(
        store,
        ActivityLogEntry {
            action: ActivityAction::Skipped,
            collection: steeple_core::collection::Collection::SkippedRecurringEvents,
            document_id: Some(skip.id),
            actor: actor.to_string(),
            details: Some(steeple_core::util::date::format_date(date)),
        },
    )
    .await;
    Ok(skip)
}
