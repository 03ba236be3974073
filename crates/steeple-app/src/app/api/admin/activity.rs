use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use steeple_db::model::Document;
use steeple_db::model::activity::ActivityLogEntry;
use steeple_service::record::activity::recent_activity;

use crate::context::get_context_from_depot;
use crate::error::{AppError, AppResult};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// ## Summary
/// GET /admin/activity?limit=N - Recent administrative actions, newest first.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<Document<ActivityLogEntry>>>> {
    let limit = match req.query::<String>("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|limit| (1..=MAX_LIMIT).contains(limit))
            .ok_or_else(|| {
                AppError::BadRequest(format!("limit must be between 1 and {MAX_LIMIT}"))
            })?,
    };

    let context = get_context_from_depot(depot)?;
    Ok(Json(recent_activity(context.store(), limit).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("activity").get(list)
}
