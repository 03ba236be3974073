use salvo::writing::Json;
use salvo::{Depot, Router, handler};
use serde::Serialize;

use crate::context::get_context_from_depot;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    today: String,
}

/// ## Summary
/// Reports that the server is up, along with the calendar date it is using.
#[handler]
async fn healthcheck(depot: &mut Depot) -> AppResult<Json<Health>> {
    let context = get_context_from_depot(depot)?;
    Ok(Json(Health {
        status: "ok",
        today: steeple_core::util::date::format_date(context.today()),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
