use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tokio::sync::{RwLock, broadcast};

use steeple_core::collection::Collection;

use super::hub::SubscriptionHub;
use super::{
    BatchWrite, CollectionSnapshot, DocumentStore, OrderBy, StoreFuture, StoredDocument,
    apply_order, merge_fields, sort_by_creation,
};
use crate::error::{DbError, DbResult};

type Tables = HashMap<Collection, HashMap<uuid::Uuid, StoredDocument>>;

/// In-process document store.
///
/// All state sits behind one `RwLock`, so a batch is applied inside a single
/// write critical section and is atomic with respect to every other caller.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    tables: RwLock<Tables>,
    hub: SubscriptionHub,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot_of(tables: &Tables, collection: Collection) -> Vec<StoredDocument> {
        let mut documents: Vec<StoredDocument> = tables
            .get(&collection)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default();
        sort_by_creation(&mut documents);
        documents
    }

    fn publish(&self, tables: &Tables, collection: Collection) {
        if self.hub.has_subscribers(collection) {
            self.hub
                .publish(collection, Self::snapshot_of(tables, collection));
        }
    }

    fn apply_one(tables: &mut Tables, write: BatchWrite) -> DbResult<()> {
        match write {
            BatchWrite::Patch {
                collection,
                id,
                fields,
            } => {
                let document = tables
                    .get_mut(&collection)
                    .and_then(|table| table.get_mut(&id))
                    .ok_or(DbError::NotFound { collection, id })?;
                merge_fields(&mut document.data, fields);
                document.updated_at = chrono::Utc::now();
            }
            BatchWrite::Delete { collection, id } => {
                tables
                    .get_mut(&collection)
                    .and_then(|table| table.remove(&id))
                    .ok_or(DbError::NotFound { collection, id })?;
            }
        }
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn insert(
        &self,
        collection: Collection,
        id: Option<uuid::Uuid>,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let id = id.unwrap_or_else(uuid::Uuid::now_v7);
            let mut tables = self.tables.write().await;
            let table = tables.entry(collection).or_default();

            if table.contains_key(&id) {
                return Err(DbError::AlreadyExists { collection, id });
            }

            let now = chrono::Utc::now();
            let document = StoredDocument {
                collection,
                id,
                data,
                created_at: now,
                updated_at: now,
            };
            table.insert(id, document.clone());
            tracing::debug!(%collection, %id, "Inserted document");

            self.publish(&tables, collection);
            Ok(document)
        })
    }

    fn get(
        &self,
        collection: Collection,
        id: uuid::Uuid,
    ) -> StoreFuture<'_, Option<StoredDocument>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            Ok(tables
                .get(&collection)
                .and_then(|table| table.get(&id))
                .cloned())
        })
    }

    fn list<'a>(
        &'a self,
        collection: Collection,
        order: Option<&'a OrderBy>,
    ) -> StoreFuture<'a, Vec<StoredDocument>> {
        Box::pin(async move {
            let tables = self.tables.read().await;
            let mut documents = Self::snapshot_of(&tables, collection);
            if let Some(order) = order {
                apply_order(&mut documents, order);
            }
            Ok(documents)
        })
    }

    fn replace(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let document = tables
                .get_mut(&collection)
                .and_then(|table| table.get_mut(&id))
                .ok_or(DbError::NotFound { collection, id })?;

            document.data = data;
            document.updated_at = chrono::Utc::now();
            let updated = document.clone();
            tracing::debug!(%collection, %id, "Replaced document");

            self.publish(&tables, collection);
            Ok(updated)
        })
    }

    fn upsert(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let now = chrono::Utc::now();
            let table = tables.entry(collection).or_default();

            let document = match table.entry(id) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    existing.data = data;
                    existing.updated_at = now;
                    existing.clone()
                }
                Entry::Vacant(entry) => entry
                    .insert(StoredDocument {
                        collection,
                        id,
                        data,
                        created_at: now,
                        updated_at: now,
                    })
                    .clone(),
            };

            self.publish(&tables, collection);
            Ok(document)
        })
    }

    fn delete(&self, collection: Collection, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            tables
                .get_mut(&collection)
                .and_then(|table| table.remove(&id))
                .ok_or(DbError::NotFound { collection, id })?;
            tracing::debug!(%collection, %id, "Deleted document");

            self.publish(&tables, collection);
            Ok(())
        })
    }

    fn apply_batch(&self, writes: Vec<BatchWrite>) -> StoreFuture<'_, usize> {
        Box::pin(async move {
            let mut tables = self.tables.write().await;
            let touched: BTreeSet<Collection> = writes.iter().map(BatchWrite::collection).collect();
            let count = writes.len();

            // Work on a copy of the touched tables so a failure leaves nothing behind.
            let mut staged: Tables = touched
                .iter()
                .filter_map(|c| tables.get(c).map(|table| (*c, table.clone())))
                .collect();
            for write in writes {
                Self::apply_one(&mut staged, write)?;
            }
            tables.extend(staged);
            tracing::debug!(writes = count, collections = touched.len(), "Applied batch");

            for collection in touched {
                self.publish(&tables, collection);
            }
            Ok(count)
        })
    }

    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<CollectionSnapshot> {
        self.hub.subscribe(collection)
    }
}
