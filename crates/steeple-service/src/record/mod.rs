//! Validated CRUD over the document collections.
//!
//! ## Module Organization
//!
//! - `activity`: best-effort audit trail of administrative mutations
//! - `batch`: all-or-nothing mark-read and reorder
//! - `settings`: the site settings singleton

use steeple_core::collection::Collection;
use steeple_core::error::CoreError;
use steeple_db::model::activity::{ActivityAction, ActivityLogEntry};
use steeple_db::model::{Document, Record};
use steeple_db::store::repository::Repository;
use steeple_db::store::{DocumentStore, OrderBy};

use crate::error::{ServiceError, ServiceResult};

pub mod activity;
pub mod batch;
pub mod settings;

#[cfg(test)]
mod record_tests;

/// ## Summary
/// Runs the record's own checks, surfacing failures as `ValidationError`.
///
/// ## Errors
/// Returns `ValidationError` naming the offending field.
pub fn validated<T: Record>(record: &T) -> ServiceResult<()> {
    record.validate().map_err(|e| match e {
        CoreError::ValidationError(message) => ServiceError::ValidationError(message),
        other => ServiceError::CoreError(other),
    })
}

/// Listing order used by the admin screens when the caller asks for none.
#[must_use]
pub fn default_order(collection: Collection) -> Option<OrderBy> {
    if collection.is_orderable() {
        Some(OrderBy::asc("order"))
    } else if collection == Collection::Events {
        Some(OrderBy::asc("date"))
    } else {
        None
    }
}

/// CRUD over one collection on behalf of one administrator.
pub struct RecordService<'s, T> {
    store: &'s dyn DocumentStore,
    repo: Repository<'s, T>,
    actor: &'s str,
}

impl<'s, T: Record> RecordService<'s, T> {
    #[must_use]
    pub fn new(store: &'s dyn DocumentStore, actor: &'s str) -> Self {
        Self::in_collection(store, T::COLLECTION, actor)
    }

    #[must_use]
    pub fn in_collection(store: &'s dyn DocumentStore, collection: Collection, actor: &'s str) -> Self {
        Self {
            store,
            repo: Repository::in_collection(store, collection),
            actor,
        }
    }

    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.repo.collection()
    }

    /// ## Summary
    /// Validates and stores a new record.
    ///
    /// ## Side Effects
    /// Writes a `created` activity entry.
    ///
    /// ## Errors
    /// Returns `ValidationError` for invalid records, or a store error.
    #[tracing::instrument(skip(self, record), fields(collection = %self.collection()))]
    pub async fn create(&self, record: &T) -> ServiceResult<Document<T>> {
        validated(record)?;
        let document = self.repo.create(record).await?;
        tracing::info!(id = %document.id, "Record created");

        self.log(ActivityAction::Created, Some(document.id), None).await;
        Ok(document)
    }

    /// ## Errors
    /// Returns `NotFound` if no record has this id.
    pub async fn get(&self, id: uuid::Uuid) -> ServiceResult<Document<T>> {
        Ok(self.repo.require(id).await?)
    }

    /// ## Errors
    /// Returns store or decoding errors.
    pub async fn list(&self, order: Option<&OrderBy>) -> ServiceResult<Vec<Document<T>>> {
        let fallback = default_order(self.collection());
        Ok(self.repo.list(order.or(fallback.as_ref())).await?)
    }

    /// ## Summary
    /// Validates and replaces an existing record, keeping its creation time.
    ///
    /// ## Side Effects
    /// Writes an `updated` activity entry.
    ///
    /// ## Errors
    /// Returns `ValidationError` for invalid records or `NotFound` for unknown ids.
    #[tracing::instrument(skip(self, record), fields(collection = %self.collection()))]
    pub async fn update(&self, id: uuid::Uuid, record: &T) -> ServiceResult<Document<T>> {
        validated(record)?;
        let document = self.repo.replace(id, record).await?;
        tracing::info!("Record updated");

        self.log(ActivityAction::Updated, Some(id), None).await;
        Ok(document)
    }

    /// ## Summary
    /// Deletes a record and returns what was removed.
    ///
    /// ## Side Effects
    /// Writes a `deleted` activity entry.
    ///
    /// ## Errors
    /// Returns `NotFound` if no record has this id.
    #[tracing::instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn delete(&self, id: uuid::Uuid) -> ServiceResult<Document<T>> {
        let document = self.repo.require(id).await?;
        self.repo.delete(id).await?;
        tracing::info!("Record deleted");

        self.log(ActivityAction::Deleted, Some(id), None).await;
        Ok(document)
    }

    async fn log(&self, action: ActivityAction, document_id: Option<uuid::Uuid>, details: Option<String>) {
        activity::log_activity(
            self.store,
            ActivityLogEntry {
                action,
                collection: self.collection(),
                document_id,
                actor: self.actor.to_string(),
                details,
            },
        )
        .await;
    }
}
