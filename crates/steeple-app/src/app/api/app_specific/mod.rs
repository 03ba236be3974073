// Endpoints outside the admin collections: health, identity and accounts.

use salvo::Router;

use super::APP_ROUTE_COMPONENT;

mod auth;
mod healthcheck;
mod whoami;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(APP_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(whoami::routes())
        .push(auth::routes())
}
