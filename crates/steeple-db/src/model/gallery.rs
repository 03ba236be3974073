use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::require;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub title: String,
    pub image_url: String,
    /// Object-store key, kept so the file can be removed with the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl Record for GalleryItem {
    const COLLECTION: Collection = Collection::Gallery;

    fn validate(&self) -> CoreResult<()> {
        require("title", &self.title)?;
        require("imageUrl", &self.image_url)
    }
}
