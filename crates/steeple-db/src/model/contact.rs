use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::{require, require_email};

/// A message sent through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::ContactMessages;

    fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("message", &self.message)
    }
}
