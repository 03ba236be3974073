//! Expansion of weekly recurring-event definitions into dated occurrences.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use steeple_core::constants::RECURRING_ID_PREFIX;
use steeple_core::util::date::format_date;
use steeple_db::model::Document;
use steeple_db::model::recurring::{MAX_DAY_OF_WEEK, RecurringEventDefinition, SkipException};

use crate::error::{ServiceError, ServiceResult};

const DAYS_PER_WEEK: u64 = 7;

/// One dated instance of a recurring event. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOccurrence {
    /// `recurring-{definitionId}-{date}`.
    #[serde(rename = "id")]
    pub synthetic_id: String,
    pub definition_id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

#[must_use]
pub fn synthetic_id(definition_id: uuid::Uuid, date: NaiveDate) -> String {
    format!("{RECURRING_ID_PREFIX}{definition_id}-{}", format_date(date))
}

/// ## Summary
/// Expands active definitions into occurrences from `today` through
/// `today + weeks_ahead * 7` days, both ends inclusive.
///
/// Any date listed in `exclusions` is suppressed for every definition, no
/// matter which definition the exclusion was filed against. Output follows
/// definition order, then date.
///
/// ## Errors
/// Returns `InvalidDefinition` if an active definition has a `day_of_week`
/// outside 0..=6.
#[tracing::instrument(skip(definitions, exclusions), fields(definitions = definitions.len(), exclusions = exclusions.len()))]
pub fn generate_occurrences(
    definitions: &[Document<RecurringEventDefinition>],
    exclusions: &[Document<SkipException>],
    weeks_ahead: u32,
    today: NaiveDate,
) -> ServiceResult<Vec<GeneratedOccurrence>> {
    let skipped: HashSet<NaiveDate> = exclusions.iter().map(|e| e.data.skip_date).collect();
    let window_end = today
        .checked_add_days(Days::new(u64::from(weeks_ahead) * DAYS_PER_WEEK))
        .unwrap_or(NaiveDate::MAX);

    let mut occurrences = Vec::new();
    for definition in definitions.iter().filter(|d| d.data.is_active) {
        let Some(mut date) = first_matching_day(definition, today)? else {
            continue;
        };

        while date <= window_end {
            if skipped.contains(&date) {
                tracing::trace!(definition = %definition.id, date = %date, "Occurrence skipped");
            } else {
                occurrences.push(occurrence_for(definition, date));
            }

            match date.checked_add_days(Days::new(DAYS_PER_WEEK)) {
                Some(next) => date = next,
                None => break,
            }
        }
    }

    tracing::debug!(generated = occurrences.len(), "Generated occurrences");
    Ok(occurrences)
}

/// First date on or after `today` that falls on the definition's weekday.
fn first_matching_day(
    definition: &Document<RecurringEventDefinition>,
    today: NaiveDate,
) -> ServiceResult<Option<NaiveDate>> {
    let target = definition.data.day_of_week;
    if target > MAX_DAY_OF_WEEK {
        return Err(ServiceError::InvalidDefinition(format!(
            "recurring event {} has dayOfWeek {target}, expected 0-{MAX_DAY_OF_WEEK}",
            definition.id
        )));
    }

    let current = today.weekday().num_days_from_sunday();
    let offset = (u32::from(target) + 7 - current) % 7;
    Ok(today.checked_add_days(Days::new(u64::from(offset))))
}

fn occurrence_for(
    definition: &Document<RecurringEventDefinition>,
    date: NaiveDate,
) -> GeneratedOccurrence {
    let data = &definition.data;
    GeneratedOccurrence {
        synthetic_id: synthetic_id(definition.id, date),
        definition_id: definition.id,
        title: data.title.clone(),
        description: data.description.clone(),
        location: data.location.clone(),
        date,
        start_time: data.start_time.clone(),
        end_time: data.end_time.clone(),
    }
}

/// ## Summary
/// Maps a synthetic occurrence id back to the definition it came from.
///
/// Matching is by substring containment of the definition id.
#[must_use]
pub fn definition_id_for(
    synthetic_id: &str,
    definitions: &[Document<RecurringEventDefinition>],
) -> Option<uuid::Uuid> {
    if !synthetic_id.starts_with(RECURRING_ID_PREFIX) {
        return None;
    }
    definitions
        .iter()
        .find(|d| synthetic_id.contains(&d.id.to_string()))
        .map(|d| d.id)
}
