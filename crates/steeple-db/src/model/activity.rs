use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
    Reordered,
    MarkedRead,
    Skipped,
    Uploaded,
    Exported,
}

/// Audit trail entry for an administrative mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub action: ActivityAction,
    pub collection: Collection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<uuid::Uuid>,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Record for ActivityLogEntry {
    const COLLECTION: Collection = Collection::ActivityLog;
}
