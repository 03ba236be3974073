//! The authenticated administrator as carried through a request.

use steeple_db::model::user::AdminIdentity;

use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_ADMIN: &str = "__authenticated_admin";
}

/// Get the authenticated administrator from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the request was not authenticated.
pub fn get_admin_from_depot(depot: &salvo::Depot) -> ServiceResult<&AdminIdentity> {
    depot
        .get::<AdminIdentity>(depot_keys::AUTHENTICATED_ADMIN)
        .map_err(|_e| ServiceError::NotAuthenticated)
}

/// Check if the request carries an authenticated administrator.
#[must_use]
pub fn is_authenticated(depot: &salvo::Depot) -> bool {
    get_admin_from_depot(depot).is_ok()
}
