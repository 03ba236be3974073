use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde_json::Value;
use tokio::sync::broadcast;

use steeple_core::collection::Collection;

use super::hub::SubscriptionHub;
use super::{
    BatchWrite, CollectionSnapshot, DocumentStore, OrderBy, StoreFuture, StoredDocument,
    apply_order, merge_fields,
};
use crate::db::connection::{DbConnection, DbPool};
use crate::db::schema::document;
use crate::error::{DbError, DbResult};

/// Row shape of the `document` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = document)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct DocumentRow {
    collection: String,
    id: uuid::Uuid,
    data: Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl DocumentRow {
    fn into_stored(self) -> DbResult<StoredDocument> {
        Ok(StoredDocument {
            collection: self.collection.parse::<Collection>()?,
            id: self.id,
            data: self.data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Document store over a single JSONB table in Postgres.
pub struct PgDocumentStore {
    pool: DbPool,
    hub: SubscriptionHub,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            hub: SubscriptionHub::new(),
        }
    }

    async fn load_collection(
        conn: &mut DbConnection<'_>,
        collection: Collection,
    ) -> DbResult<Vec<StoredDocument>> {
        document::table
            .filter(document::collection.eq(collection.as_str()))
            .order((document::created_at.asc(), document::id.asc()))
            .select(DocumentRow::as_select())
            .load::<DocumentRow>(conn)
            .await?
            .into_iter()
            .map(DocumentRow::into_stored)
            .collect()
    }

    /// Publishes a fresh snapshot. Failures are traced, never surfaced: the
    /// write they follow has already committed.
    async fn publish(&self, conn: &mut DbConnection<'_>, collection: Collection) {
        if !self.hub.has_subscribers(collection) {
            return;
        }
        match Self::load_collection(conn, collection).await {
            Ok(documents) => self.hub.publish(collection, documents),
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Failed to load snapshot for subscribers");
            }
        }
    }
}

impl DocumentStore for PgDocumentStore {
    #[tracing::instrument(skip(self, data), fields(%collection))]
    fn insert(
        &self,
        collection: Collection,
        id: Option<uuid::Uuid>,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;
            let now = chrono::Utc::now();
            let id = id.unwrap_or_else(uuid::Uuid::now_v7);

            let row = DocumentRow {
                collection: collection.as_str().to_string(),
                id,
                data,
                created_at: now,
                updated_at: now,
            };

            let inserted = diesel::insert_into(document::table)
                .values(&row)
                .on_conflict_do_nothing()
                .returning(DocumentRow::as_returning())
                .get_result::<DocumentRow>(&mut conn)
                .await
                .optional()?
                .ok_or(DbError::AlreadyExists { collection, id })?;

            tracing::debug!(%id, "Inserted document");
            self.publish(&mut conn, collection).await;
            inserted.into_stored()
        })
    }

    fn get(
        &self,
        collection: Collection,
        id: uuid::Uuid,
    ) -> StoreFuture<'_, Option<StoredDocument>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;
            document::table
                .filter(document::collection.eq(collection.as_str()))
                .filter(document::id.eq(id))
                .select(DocumentRow::as_select())
                .first::<DocumentRow>(&mut conn)
                .await
                .optional()?
                .map(DocumentRow::into_stored)
                .transpose()
        })
    }

    fn list<'a>(
        &'a self,
        collection: Collection,
        order: Option<&'a OrderBy>,
    ) -> StoreFuture<'a, Vec<StoredDocument>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;
            let mut documents = Self::load_collection(&mut conn, collection).await?;
            if let Some(order) = order {
                apply_order(&mut documents, order);
            }
            Ok(documents)
        })
    }

    #[tracing::instrument(skip(self, data), fields(%collection, %id))]
    fn replace(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;

            let updated = diesel::update(
                document::table
                    .filter(document::collection.eq(collection.as_str()))
                    .filter(document::id.eq(id)),
            )
            .set((
                document::data.eq(data),
                document::updated_at.eq(chrono::Utc::now()),
            ))
            .returning(DocumentRow::as_returning())
            .get_result::<DocumentRow>(&mut conn)
            .await
            .optional()?
            .ok_or(DbError::NotFound { collection, id })?;

            self.publish(&mut conn, collection).await;
            updated.into_stored()
        })
    }

    #[tracing::instrument(skip(self, data), fields(%collection, %id))]
    fn upsert(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;
            let now = chrono::Utc::now();

            let row = DocumentRow {
                collection: collection.as_str().to_string(),
                id,
                data,
                created_at: now,
                updated_at: now,
            };

            let stored = diesel::insert_into(document::table)
                .values(&row)
                .on_conflict((document::collection, document::id))
                .do_update()
                .set((
                    document::data.eq(excluded(document::data)),
                    document::updated_at.eq(excluded(document::updated_at)),
                ))
                .returning(DocumentRow::as_returning())
                .get_result::<DocumentRow>(&mut conn)
                .await?;

            self.publish(&mut conn, collection).await;
            stored.into_stored()
        })
    }

    #[tracing::instrument(skip(self), fields(%collection, %id))]
    fn delete(&self, collection: Collection, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;

            let removed = diesel::delete(
                document::table
                    .filter(document::collection.eq(collection.as_str()))
                    .filter(document::id.eq(id)),
            )
            .execute(&mut conn)
            .await?;

            if removed == 0 {
                return Err(DbError::NotFound { collection, id });
            }

            self.publish(&mut conn, collection).await;
            Ok(())
        })
    }

    #[tracing::instrument(skip(self, writes), fields(writes = writes.len()))]
    fn apply_batch(&self, writes: Vec<BatchWrite>) -> StoreFuture<'_, usize> {
        Box::pin(async move {
            let mut conn = self.pool.get().await?;
            let touched: BTreeSet<Collection> = writes.iter().map(BatchWrite::collection).collect();

            let applied = conn
                .transaction::<_, DbError, _>(|conn| {
                    async move {
                        let count = writes.len();
                        for write in writes {
                            apply_write(conn, write).await?;
                        }
                        Ok(count)
                    }
                    .scope_boxed()
                })
                .await?;

            for collection in touched {
                self.publish(&mut conn, collection).await;
            }
            Ok(applied)
        })
    }

    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<CollectionSnapshot> {
        self.hub.subscribe(collection)
    }
}

async fn apply_write(conn: &mut DbConnection<'_>, write: BatchWrite) -> DbResult<()> {
    match write {
        BatchWrite::Patch {
            collection,
            id,
            fields,
        } => {
            let mut data = document::table
                .filter(document::collection.eq(collection.as_str()))
                .filter(document::id.eq(id))
                .select(document::data)
                .for_update()
                .first::<Value>(conn)
                .await
                .optional()?
                .ok_or(DbError::NotFound { collection, id })?;

            merge_fields(&mut data, fields);

            diesel::update(
                document::table
                    .filter(document::collection.eq(collection.as_str()))
                    .filter(document::id.eq(id)),
            )
            .set((
                document::data.eq(data),
                document::updated_at.eq(chrono::Utc::now()),
            ))
            .execute(conn)
            .await?;
        }
        BatchWrite::Delete { collection, id } => {
            let removed = diesel::delete(
                document::table
                    .filter(document::collection.eq(collection.as_str()))
                    .filter(document::id.eq(id)),
            )
            .execute(conn)
            .await?;

            if removed == 0 {
                return Err(DbError::NotFound { collection, id });
            }
        }
    }
    Ok(())
}
