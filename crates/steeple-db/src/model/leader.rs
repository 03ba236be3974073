use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::validate::{optional_email, require};
use super::{Record, default_true};

/// A pastor or team lead.
///
/// Both kinds share this shape; they live in the `pastors` and `teamLeads`
/// collections respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for Leader {
    const COLLECTION: Collection = Collection::Pastors;

    fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)?;
        require("role", &self.role)?;
        optional_email("email", self.email.as_deref())
    }
}
