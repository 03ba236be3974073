//! Typed records stored in the document collections.
//!
//! Every record is a flat serde struct with camelCase field names. Stored
//! copies are wrapped in [`Document`], which adds the id and timestamps the
//! store assigns.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use crate::error::DbResult;
use crate::store::StoredDocument;

pub mod activity;
pub mod carousel;
pub mod contact;
pub mod event;
pub mod export_log;
pub mod gallery;
pub mod leader;
pub mod newsletter;
pub mod prayer;
pub mod recurring;
pub mod settings;
pub mod testimony;
pub mod user;
pub mod validate;

/// A record type that lives in a document collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the record is stored in by default.
    const COLLECTION: Collection;

    /// Required-field and format checks run before every create and update.
    ///
    /// ## Errors
    /// Returns `ValidationError` naming the first offending field.
    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// A stored record with its server-assigned metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: uuid::Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: DeserializeOwned> Document<T> {
    /// ## Summary
    /// Decodes a raw stored document into its typed form.
    ///
    /// ## Errors
    /// Returns `SerializationError` if the body does not match `T`.
    pub fn from_stored(stored: StoredDocument) -> DbResult<Self> {
        Ok(Self {
            id: stored.id,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            data: serde_json::from_value(stored.data)?,
        })
    }
}

pub(crate) const fn default_true() -> bool {
    true
}
