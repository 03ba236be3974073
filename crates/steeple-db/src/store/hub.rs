use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use steeple_core::collection::Collection;

use super::{CollectionSnapshot, StoredDocument};

/// Snapshots buffered per subscriber before it starts lagging.
const SNAPSHOT_BUFFER: usize = 16;

/// Broadcast channels for push subscriptions, one per collection.
///
/// Channels are created up front so publishing never needs a lock. A lagging
/// subscriber loses intermediate snapshots, which is harmless because every
/// snapshot carries the whole collection.
#[derive(Debug)]
pub struct SubscriptionHub {
    senders: HashMap<Collection, broadcast::Sender<CollectionSnapshot>>,
}

impl SubscriptionHub {
    #[must_use]
    pub fn new() -> Self {
        let senders = Collection::ALL
            .into_iter()
            .map(|collection| (collection, broadcast::channel(SNAPSHOT_BUFFER).0))
            .collect();
        Self { senders }
    }

    #[must_use]
    pub fn subscribe(&self, collection: Collection) -> broadcast::Receiver<CollectionSnapshot> {
        match self.senders.get(&collection) {
            Some(sender) => sender.subscribe(),
            // Every collection has a sender; a detached receiver just never fires.
            None => broadcast::channel(1).1,
        }
    }

    /// Whether anyone is listening, so stores can skip building snapshots.
    #[must_use]
    pub fn has_subscribers(&self, collection: Collection) -> bool {
        self.senders
            .get(&collection)
            .is_some_and(|sender| sender.receiver_count() > 0)
    }

    pub fn publish(&self, collection: Collection, documents: Vec<StoredDocument>) {
        let Some(sender) = self.senders.get(&collection) else {
            return;
        };

        let count = documents.len();
        let snapshot = CollectionSnapshot {
            collection,
            documents: Arc::new(documents),
        };

        match sender.send(snapshot) {
            Ok(receivers) => {
                tracing::trace!(%collection, documents = count, receivers, "Published snapshot");
            }
            Err(_) => {
                tracing::trace!(%collection, "No subscribers for snapshot");
            }
        }
    }
}

impl Default for SubscriptionHub {
    fn default() -> Self {
        Self::new()
    }
}
