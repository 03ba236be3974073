use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::validate::require_email;
use super::{Record, default_true};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSignup {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for NewsletterSignup {
    const COLLECTION: Collection = Collection::NewsletterSignups;

    fn validate(&self) -> CoreResult<()> {
        require_email("email", &self.email)
    }
}
