use std::marker::PhantomData;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use steeple_core::collection::Collection;

use super::{CollectionSnapshot, DocumentStore, OrderBy};
use crate::error::{DbError, DbResult};
use crate::model::{Document, Record};

/// Typed access to one collection.
///
/// Most records live in [`Record::COLLECTION`]; leaders are the exception and
/// use [`Repository::in_collection`] to pick `pastors` or `teamLeads`.
pub struct Repository<'s, T> {
    store: &'s dyn DocumentStore,
    collection: Collection,
    _record: PhantomData<fn() -> T>,
}

impl<'s, T: Record> Repository<'s, T> {
    #[must_use]
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self::in_collection(store, T::COLLECTION)
    }

    #[must_use]
    pub fn in_collection(store: &'s dyn DocumentStore, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// ## Summary
    /// Stores a new record under a fresh id.
    ///
    /// ## Errors
    /// Returns `SerializationError` if the record cannot be encoded, or any store error.
    pub async fn create(&self, record: &T) -> DbResult<Document<T>> {
        let data = serde_json::to_value(record)?;
        let stored = self.store.insert(self.collection, None, data).await?;
        Document::from_stored(stored)
    }

    /// ## Summary
    /// Stores a new record under a caller-chosen id.
    ///
    /// ## Errors
    /// Returns `AlreadyExists` if the id is taken, or any other store error.
    pub async fn create_with_id(&self, id: uuid::Uuid, record: &T) -> DbResult<Document<T>> {
        let data = serde_json::to_value(record)?;
        let stored = self.store.insert(self.collection, Some(id), data).await?;
        Document::from_stored(stored)
    }

    /// ## Errors
    /// Returns store or decoding errors.
    pub async fn get(&self, id: uuid::Uuid) -> DbResult<Option<Document<T>>> {
        self.store
            .get(self.collection, id)
            .await?
            .map(Document::from_stored)
            .transpose()
    }

    /// ## Errors
    /// Returns `NotFound` if no document has this id.
    pub async fn require(&self, id: uuid::Uuid) -> DbResult<Document<T>> {
        self.get(id).await?.ok_or(DbError::NotFound {
            collection: self.collection,
            id,
        })
    }

    /// ## Errors
    /// Returns store or decoding errors.
    pub async fn list(&self, order: Option<&OrderBy>) -> DbResult<Vec<Document<T>>> {
        self.store
            .list(self.collection, order)
            .await?
            .into_iter()
            .map(Document::from_stored)
            .collect()
    }

    /// ## Errors
    /// Returns `NotFound` if no document has this id.
    pub async fn replace(&self, id: uuid::Uuid, record: &T) -> DbResult<Document<T>> {
        let data = serde_json::to_value(record)?;
        let stored = self.store.replace(self.collection, id, data).await?;
        Document::from_stored(stored)
    }

    /// ## Errors
    /// Returns store or encoding errors.
    pub async fn upsert(&self, id: uuid::Uuid, record: &T) -> DbResult<Document<T>> {
        let data = serde_json::to_value(record)?;
        let stored = self.store.upsert(self.collection, id, data).await?;
        Document::from_stored(stored)
    }

    /// ## Errors
    /// Returns `NotFound` if no document has this id.
    pub async fn delete(&self, id: uuid::Uuid) -> DbResult<()> {
        self.store.delete(self.collection, id).await
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.store.subscribe(self.collection),
            _record: PhantomData,
        }
    }
}

/// Typed stream of collection snapshots. Dropping it unsubscribes.
pub struct Subscription<T> {
    receiver: broadcast::Receiver<CollectionSnapshot>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Subscription<T> {
    /// ## Summary
    /// Waits for the next snapshot and decodes it.
    ///
    /// Snapshots missed while lagging are skipped, since the next one
    /// supersedes them. Returns `None` once the store is gone.
    ///
    /// ## Errors
    /// Returns `SerializationError` if a stored document no longer matches `T`.
    pub async fn next(&mut self) -> Option<DbResult<Vec<Document<T>>>> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => {
                    return Some(
                        snapshot
                            .documents
                            .iter()
                            .cloned()
                            .map(Document::from_stored)
                            .collect(),
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Subscriber lagged; waiting for a newer snapshot");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
