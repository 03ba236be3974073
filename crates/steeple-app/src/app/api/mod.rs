mod admin;
mod app_specific;

use salvo::Router;

// Re-export route constants from core
pub use steeple_core::constants::{
    ADMIN_ROUTE_COMPONENT, ADMIN_ROUTE_PREFIX, API_ROUTE_COMPONENT, API_ROUTE_PREFIX,
    APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the `/api` router: public app endpoints and the authenticated admin API.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(admin::routes())
}
