use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;

use super::Record;

/// Record of a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogEntry {
    pub collection: Collection,
    pub format: String,
    pub record_count: usize,
    pub file_name: String,
    pub exported_by: String,
}

impl Record for ExportLogEntry {
    const COLLECTION: Collection = Collection::ExportLogs;
}
