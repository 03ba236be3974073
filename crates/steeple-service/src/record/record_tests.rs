use serde_json::Value;
use tokio::sync::broadcast;

use steeple_core::collection::Collection;
use steeple_db::error::DbError;
use steeple_db::model::activity::{ActivityAction, ActivityLogEntry};
use steeple_db::model::contact::ContactMessage;
use steeple_db::model::leader::Leader;
use steeple_db::model::settings::SiteSettings;
use steeple_db::store::memory::MemoryDocumentStore;
use steeple_db::store::repository::Repository;
use steeple_db::store::{
    BatchWrite, CollectionSnapshot, DocumentStore, OrderBy, StoreFuture, StoredDocument,
};

use super::activity::recent_activity;
use super::batch::{mark_read, reorder};
use super::settings::{get_settings, update_settings};
use super::RecordService;
use crate::error::{ErrorKind, ServiceError};

const ACTOR: &str = "admin@example.org";

/// Delegates to a memory store but refuses every activity log write.
#[derive(Default)]
struct NoActivityStore {
    inner: MemoryDocumentStore,
}

impl DocumentStore for NoActivityStore {
    fn insert(
        &self,
        collection: Collection,
        id: Option<uuid::Uuid>,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        if collection == Collection::ActivityLog {
            return Box::pin(async {
                Err(DbError::IoError(std::io::Error::other("activity log offline")))
            });
        }
        self.inner.insert(collection, id, data)
    }

    fn get(
        &self,
        collection: Collection,
        id: uuid::Uuid,
    ) -> StoreFuture<'_, Option<StoredDocument>> {
        self.inner.get(collection, id)
    }

    fn list<'a>(
        &'a self,
        collection: Collection,
        order: Option<&'a OrderBy>,
    ) -> StoreFuture<'a, Vec<StoredDocument>> {
        self.inner.list(collection, order)
    }

    fn replace(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        self.inner.replace(collection, id, data)
    }

    fn upsert(
        &self,
        collection: Collection,
        id: uuid::Uuid,
        data: Value,
    ) -> StoreFuture<'_, StoredDocument> {
        self.inner.upsert(collection, id, data)
    }

    fn delete(&self, collection: Collection, id: uuid::Uuid) -> StoreFuture<'_, ()> {
        self.inner.delete(collection, id)
    }

    fn apply_batch(&self, writes: Vec<BatchWrite>) -> StoreFuture<'_, usize> {
        self.inner.apply_batch(writes)
    }

    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<CollectionSnapshot> {
        self.inner.subscribe(collection)
    }
}

fn leader(name: &str, order: i64) -> Leader {
    Leader {
        name: name.to_string(),
        role: "Elder".to_string(),
        bio: None,
        photo_url: None,
        email: None,
        phone: None,
        order,
        is_active: true,
    }
}

fn message(name: &str) -> ContactMessage {
    ContactMessage {
        name: name.to_string(),
        email: "visitor@example.org".to_string(),
        subject: None,
        message: "When is the potluck?".to_string(),
        phone: None,
        is_read: false,
    }
}

#[test_log::test(tokio::test)]
async fn test_create_validates_and_logs() {
    let store = MemoryDocumentStore::new();
    let service = RecordService::<ContactMessage>::new(&store, ACTOR);

    let mut invalid = message("Martha");
    invalid.email = "not-an-address".to_string();
    let err = service.create(&invalid).await.expect_err("invalid email");
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert_eq!(err.kind(), ErrorKind::Invalid);

    let created = service.create(&message("Martha")).await.expect("create");
    let fetched = service.get(created.id).await.expect("get");
    assert_eq!(fetched, created);

    let activity = recent_activity(&store, 10).await.expect("activity");
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].data.action, ActivityAction::Created);
    assert_eq!(activity[0].data.document_id, Some(created.id));
    assert_eq!(activity[0].data.actor, ACTOR);
}

#[test_log::test(tokio::test)]
async fn test_update_keeps_creation_time_and_delete_returns_record() {
    let store = MemoryDocumentStore::new();
    let service = RecordService::<ContactMessage>::new(&store, ACTOR);
    let created = service.create(&message("Martha")).await.expect("create");

    let mut edited = message("Martha");
    edited.subject = Some("Potluck".to_string());
    let updated = service.update(created.id, &edited).await.expect("update");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.data.subject.as_deref(), Some("Potluck"));

    let removed = service.delete(created.id).await.expect("delete");
    assert_eq!(removed.id, created.id);

    let err = service.get(created.id).await.expect_err("gone");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let actions: Vec<_> = recent_activity(&store, 10)
        .await
        .expect("activity")
        .into_iter()
        .map(|entry| entry.data.action)
        .collect();
    assert_eq!(
        actions,
        vec![ActivityAction::Deleted, ActivityAction::Updated, ActivityAction::Created]
    );
}

#[test_log::test(tokio::test)]
async fn test_leaders_share_a_record_type_across_collections() {
    let store = MemoryDocumentStore::new();
    let pastors = RecordService::<Leader>::new(&store, ACTOR);
    let team_leads = RecordService::<Leader>::in_collection(&store, Collection::TeamLeads, ACTOR);

    pastors.create(&leader("Paul", 0)).await.expect("create");
    team_leads.create(&leader("Priscilla", 0)).await.expect("create");

    assert_eq!(pastors.list(None).await.expect("list").len(), 1);
    let leads = team_leads.list(None).await.expect("list");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].data.name, "Priscilla");
}

#[test_log::test(tokio::test)]
async fn test_failed_activity_log_never_fails_mutation() {
    let store = NoActivityStore::default();
    let service = RecordService::<ContactMessage>::new(&store, ACTOR);

    let created = service.create(&message("Joanna")).await.expect("create succeeds");
    service
        .update(created.id, &message("Joanna"))
        .await
        .expect("update succeeds");
    let marked = mark_read(&store, Collection::ContactMessages, &[created.id], ACTOR)
        .await
        .expect("mark read succeeds");
    assert_eq!(marked, 1);
    service.delete(created.id).await.expect("delete succeeds");

    assert!(recent_activity(&store, 10).await.expect("activity").is_empty());
}

#[test_log::test(tokio::test)]
async fn test_mark_read_is_all_or_nothing() {
    let store = MemoryDocumentStore::new();
    let service = RecordService::<ContactMessage>::new(&store, ACTOR);
    let a = service.create(&message("Anna")).await.expect("create");
    let b = service.create(&message("Boaz")).await.expect("create");

    let err = mark_read(
        &store,
        Collection::ContactMessages,
        &[a.id, uuid::Uuid::now_v7()],
        ACTOR,
    )
    .await
    .expect_err("unknown id");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!service.get(a.id).await.expect("get").data.is_read);

    let applied = mark_read(&store, Collection::ContactMessages, &[a.id, b.id], ACTOR)
        .await
        .expect("mark read");
    assert_eq!(applied, 2);
    assert!(service.get(a.id).await.expect("get").data.is_read);
    assert!(service.get(b.id).await.expect("get").data.is_read);
}

#[test_log::test(tokio::test)]
async fn test_mark_read_rejects_collections_without_flag() {
    let store = MemoryDocumentStore::new();
    let err = mark_read(&store, Collection::Events, &[], ACTOR)
        .await
        .expect_err("events have no read flag");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[test_log::test(tokio::test)]
async fn test_reorder_writes_positions() {
    let store = MemoryDocumentStore::new();
    let service = RecordService::<Leader>::new(&store, ACTOR);
    let first = service.create(&leader("Peter", 0)).await.expect("create");
    let second = service.create(&leader("James", 1)).await.expect("create");
    let third = service.create(&leader("John", 2)).await.expect("create");

    reorder(
        &store,
        Collection::Pastors,
        &[third.id, first.id, second.id],
        ACTOR,
    )
    .await
    .expect("reorder");

    let names: Vec<_> = service
        .list(None)
        .await
        .expect("list")
        .into_iter()
        .map(|d| (d.data.name, d.data.order))
        .collect();
    assert_eq!(
        names,
        vec![
            ("John".to_string(), 0),
            ("Peter".to_string(), 1),
            ("James".to_string(), 2)
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_reorder_rejects_duplicates_and_unknown_ids() {
    let store = MemoryDocumentStore::new();
    let service = RecordService::<Leader>::new(&store, ACTOR);
    let only = service.create(&leader("Lois", 7)).await.expect("create");

    let err = reorder(&store, Collection::Pastors, &[only.id, only.id], ACTOR)
        .await
        .expect_err("duplicate");
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let err = reorder(
        &store,
        Collection::Pastors,
        &[uuid::Uuid::now_v7(), only.id],
        ACTOR,
    )
    .await
    .expect_err("unknown id");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(service.get(only.id).await.expect("get").data.order, 7);

    let err = reorder(&store, Collection::ContactMessages, &[], ACTOR)
        .await
        .expect_err("not orderable");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[test_log::test(tokio::test)]
async fn test_settings_default_until_saved() {
    let store = MemoryDocumentStore::new();
    assert_eq!(get_settings(&store).await.expect("get"), SiteSettings::default());

    let mut settings = SiteSettings::default();
    settings.church_name = "Grace Chapel".to_string();
    update_settings(&store, &settings, ACTOR).await.expect("update");
    assert_eq!(get_settings(&store).await.expect("get").church_name, "Grace Chapel");

    settings.church_name = "  ".to_string();
    let err = update_settings(&store, &settings, ACTOR)
        .await
        .expect_err("blank name");
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let stored = Repository::<SiteSettings>::new(&store).list(None).await.expect("list");
    assert_eq!(stored.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_activity_is_newest_first_and_limited() {
    let store = MemoryDocumentStore::new();
    let log = Repository::<ActivityLogEntry>::new(&store);
    for action in [ActivityAction::Created, ActivityAction::Updated, ActivityAction::Deleted] {
        log.create(&ActivityLogEntry {
            action,
            collection: Collection::Events,
            document_id: None,
            actor: ACTOR.to_string(),
            details: None,
        })
        .await
        .expect("log");
    }

    let recent = recent_activity(&store, 2).await.expect("activity");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].data.action, ActivityAction::Deleted);
    assert_eq!(recent[1].data.action, ActivityAction::Updated);
}
