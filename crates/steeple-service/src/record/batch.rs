//! Batched updates that either apply to every listed record or to none.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use steeple_core::collection::Collection;
use steeple_db::model::activity::{ActivityAction, ActivityLogEntry};
use steeple_db::store::{BatchWrite, DocumentStore};

use super::activity::log_activity;
use crate::error::{ServiceError, ServiceResult};

fn single_field(name: &str, value: Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(name.to_string(), value);
    fields
}

fn reject_duplicates(ids: &[uuid::Uuid]) -> ServiceResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    match ids.iter().find(|id| !seen.insert(**id)) {
        Some(id) => Err(ServiceError::ValidationError(format!(
            "id {id} appears more than once"
        ))),
        None => Ok(()),
    }
}

/// ## Summary
/// Marks every listed message or prayer request as read.
///
/// ## Side Effects
/// Writes one `markedRead` activity entry for the batch.
///
/// ## Errors
/// - `ValidationError` if the collection has no read flag
/// - `NotFound` if any id is unknown; nothing is changed in that case
#[tracing::instrument(skip(store, ids), fields(%collection, count = ids.len()))]
pub async fn mark_read(
    store: &dyn DocumentStore,
    collection: Collection,
    ids: &[uuid::Uuid],
    actor: &str,
) -> ServiceResult<usize> {
    if !collection.has_read_flag() {
        return Err(ServiceError::ValidationError(format!(
            "{collection} records cannot be marked read"
        )));
    }
    reject_duplicates(ids)?;
    if ids.is_empty() {
        return Ok(0);
    }

    let writes = ids
        .iter()
        .map(|id| BatchWrite::Patch {
            collection,
            id: *id,
            fields: single_field("isRead", json!(true)),
        })
        .collect();
    let applied = store.apply_batch(writes).await?;
    tracing::info!(applied, "Marked records read");

    log_activity(
        store,
        ActivityLogEntry {
            action: ActivityAction::MarkedRead,
            collection,
            document_id: None,
            actor: actor.to_string(),
            details: Some(format!("{applied} records")),
        },
    )
    .await;
    Ok(applied)
}

/// ## Summary
/// Persists a new display order: each listed record gets `order` equal to
/// its position in `ids`.
///
/// ## Side Effects
/// Writes one `reordered` activity entry for the batch.
///
/// ## Errors
/// - `ValidationError` if the collection is not orderable or `ids` repeats an id
/// - `NotFound` if any id is unknown; nothing is changed in that case
#[tracing::instrument(skip(store, ids), fields(%collection, count = ids.len()))]
pub async fn reorder(
    store: &dyn DocumentStore,
    collection: Collection,
    ids: &[uuid::Uuid],
    actor: &str,
) -> ServiceResult<usize> {
    if !collection.is_orderable() {
        return Err(ServiceError::ValidationError(format!(
            "{collection} records cannot be reordered"
        )));
    }
    reject_duplicates(ids)?;
    if ids.is_empty() {
        return Ok(0);
    }

    let writes = ids
        .iter()
        .enumerate()
        .map(|(index, id)| BatchWrite::Patch {
            collection,
            id: *id,
            fields: single_field("order", json!(index)),
        })
        .collect();
    let applied = store.apply_batch(writes).await?;
    tracing::info!(applied, "Reordered records");

    log_activity(
        store,
        ActivityLogEntry {
            action: ActivityAction::Reordered,
            collection,
            document_id: None,
            actor: actor.to_string(),
            details: Some(format!("{applied} records")),
        },
    )
    .await;
    Ok(applied)
}
