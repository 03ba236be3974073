use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use steeple_db::model::settings::SiteSettings;
use steeple_service::record::settings::{get_settings, update_settings};

use super::records::actor_from_depot;
use crate::context::get_context_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /admin/settings - The site settings, or defaults if none were saved.
#[handler]
async fn show(depot: &mut Depot) -> AppResult<Json<SiteSettings>> {
    let context = get_context_from_depot(depot)?;
    Ok(Json(get_settings(context.store()).await?))
}

/// ## Summary
/// PUT /admin/settings - Replace the site settings.
#[handler]
async fn replace(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SiteSettings>> {
    let context = get_context_from_depot(depot)?;
    let actor = actor_from_depot(depot)?;
    let settings: SiteSettings = req.parse_json().await?;

    let stored = update_settings(context.store(), &settings, &actor).await?;
    Ok(Json(stored.data))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("settings").get(show).put(replace)
}
