//! The document store seam.
//!
//! ## Module Organization
//!
//! - `hub`: per-collection broadcast of full snapshots after each committed write
//! - `memory`: in-process store used for development and tests
//! - `postgres`: JSONB-backed store over diesel-async
//! - `repository`: typed access to one collection through [`DocumentStore`]

use std::cmp::Ordering;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use steeple_core::collection::Collection;

use crate::error::DbResult;

pub mod hub;
pub mod memory;
pub mod postgres;
pub mod repository;


pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = DbResult<T>> + Send + 'a>>;

/// A raw stored document: identifier, timestamps and the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: Collection,
    pub id: uuid::Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full contents of one collection at the moment a write committed.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    pub collection: Collection,
    pub documents: Arc<Vec<StoredDocument>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering on a top-level JSON field of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// One step of an all-or-nothing batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchWrite {
    /// Merge top-level fields into an existing document.
    Patch {
        collection: Collection,
        id: uuid::Uuid,
        fields: Map<String, Value>,
    },
    Delete {
        collection: Collection,
        id: uuid::Uuid,
    },
}

impl BatchWrite {
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Patch { collection, .. } | Self::Delete { collection, .. } => *collection,
        }
    }
}

/// Collection-scoped document storage with ordered listing, atomic batches
/// and push subscriptions.
///
/// Every successful write publishes a fresh [`CollectionSnapshot`] for the
/// collections it touched.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. A `None` id assigns a fresh UUID v7.
    fn insert(
        &self,
        collection: Collection,
        id: Option<uuid::Uuid>,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument>;

    fn get(&self, collection: Collection, id: uuid::Uuid)
    -> StoreFuture<'_, Option<StoredDocument>>;

    /// List a collection. Without an explicit order documents come back by
    /// creation time, oldest first.
    fn list<'a>(
        &'a self,
        collection: Collection,
        order: Option<&'a OrderBy>,
    ) -> StoreFuture<'a, Vec<StoredDocument>>;

    /// Replace the body of an existing document, keeping `created_at`.
    fn replace(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument>;

    /// Create or replace the document with this id.
    fn upsert(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument>;

    fn delete(&self, collection: Collection, id: uuid::Uuid) -> StoreFuture<'_, ()>;

    /// Apply every write or none of them. Returns the number of writes applied.
    fn apply_batch(&self, writes: Vec<BatchWrite>) -> StoreFuture<'_, usize>;

    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<CollectionSnapshot>;
}

/// ## Summary
/// Sorts documents by creation time, breaking ties on id.
pub fn sort_by_creation(documents: &mut [StoredDocument]) {
    documents.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// ## Summary
/// Applies an explicit field ordering on top of creation order.
///
/// The sort is stable, so documents with equal keys keep their creation order.
pub fn apply_order(documents: &mut [StoredDocument], order: &OrderBy) {
    documents.sort_by(|a, b| {
        let ordering = compare_json(a.data.get(&order.field), b.data.get(&order.field));
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Total order over optional JSON values: missing and null first, then
/// booleans, numbers, strings; anything else compares equal.
fn compare_json(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// ## Summary
/// Merges top-level fields into a JSON object body.
///
/// A non-object body is replaced by an object holding just the patch.
pub fn merge_fields(data: &mut Value, fields: Map<String, Value>) {
    if let Value::Object(existing) = data {
        existing.extend(fields);
    } else {
        *data = Value::Object(fields);
    }
}
