use steeple_db::model::Document;
use steeple_db::model::activity::ActivityLogEntry;
use steeple_db::store::repository::Repository;
use steeple_db::store::DocumentStore;

use crate::error::ServiceResult;

/// ## Summary
/// Appends an entry to the activity log.
///
/// Logging never fails the mutation it describes: errors are traced and
/// dropped.
pub async fn log_activity(store: &dyn DocumentStore, entry: ActivityLogEntry) {
    let action = entry.action;
    let collection = entry.collection;

    if let Err(e) = Repository::<ActivityLogEntry>::new(store).create(&entry).await {
        tracing::warn!(?action, %collection, error = %e, "Failed to write activity log entry");
    }
}

/// ## Summary
/// Returns the most recent activity entries, newest first.
///
/// ## Errors
/// Returns store or decoding errors.
pub async fn recent_activity(
    store: &dyn DocumentStore,
    limit: usize,
) -> ServiceResult<Vec<Document<ActivityLogEntry>>> {
    let mut entries = Repository::<ActivityLogEntry>::new(store).list(None).await?;
    entries.reverse();
    entries.truncate(limit);
    Ok(entries)
}
