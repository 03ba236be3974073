use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::{Document, Record};
use super::validate::{require, require_email};

/// An administrator account. The hash is Argon2id in PHC string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Record for AdminUser {
    const COLLECTION: Collection = Collection::AdminUsers;

    fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("passwordHash", &self.password_hash)
    }
}

/// Namespace for the name-based ids of administrator documents.
const ADMIN_ID_NAMESPACE: uuid::Uuid = uuid::Uuid::from_u128(0x5b1e_7a3c_0d42_4f8e_9a61_2c7d_e4f0_b913);

/// Id of the account created while no administrator exists. Two concurrent
/// first registrations collide on it.
pub const BOOTSTRAP_ADMIN_ID: uuid::Uuid = uuid::Uuid::from_u128(1);

/// Id an administrator is stored under, derived from the lowercased email so
/// two accounts for one address collide in the store.
#[must_use]
pub fn admin_user_id(email: &str) -> uuid::Uuid {
    uuid::Uuid::new_v5(&ADMIN_ID_NAMESPACE, email.trim().to_lowercase().as_bytes())
}

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<uuid::Uuid>,
    pub name: String,
    pub email: String,
}

impl From<&Document<AdminUser>> for AdminIdentity {
    fn from(user: &Document<AdminUser>) -> Self {
        Self {
            user_id: Some(user.id),
            name: user.data.name.clone(),
            email: user.data.email.clone(),
        }
    }
}
