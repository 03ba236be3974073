use salvo::writing::Json;
use salvo::{Depot, Router, handler};

use steeple_db::model::user::AdminIdentity;
use steeple_service::auth::get_admin_from_depot;

use crate::error::AppResult;
use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// Returns the authenticated administrator.
/// The identity is placed in the depot by the `AuthMiddleware`.
#[handler]
async fn whoami(depot: &mut Depot) -> AppResult<Json<AdminIdentity>> {
    Ok(Json(get_admin_from_depot(depot)?.clone()))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").hoop(AuthMiddleware).get(whoami)
}
