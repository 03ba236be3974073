//! Generated occurrences, the combined calendar and skipping one date.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use steeple_core::util::date::parse_date;
use steeple_db::model::Document;
use steeple_db::model::recurring::SkipException;
use steeple_service::calendar::{
    CalendarEntry, GeneratedOccurrence, load_calendar, load_occurrences, skip_occurrence,
};

use super::records::{actor_from_depot, id_param};
use crate::config::get_config_from_depot;
use crate::context::get_context_from_depot;
use crate::error::{AppError, AppResult};

/// Longest look-ahead a caller may ask for.
pub const MAX_WEEKS_AHEAD: u32 = 104;

/// ## Summary
/// Reads `?weeks=N`, falling back to the configured look-ahead.
///
/// ## Errors
/// Returns `BadRequest` if `weeks` is not a number in `0..=MAX_WEEKS_AHEAD`.
fn weeks_param(req: &Request, depot: &Depot) -> AppResult<u32> {
    let Some(raw) = req.query::<String>("weeks") else {
        return Ok(get_config_from_depot(depot)?.calendar.weeks_ahead);
    };

    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|weeks| *weeks <= MAX_WEEKS_AHEAD)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "weeks must be a whole number between 0 and {MAX_WEEKS_AHEAD}"
            ))
        })
}

/// ## Summary
/// GET /admin/occurrences - Upcoming occurrences of every active recurring event.
#[handler]
async fn occurrences(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<GeneratedOccurrence>>> {
    let weeks = weeks_param(req, depot)?;
    let context = get_context_from_depot(depot)?;

    let generated = load_occurrences(context.store(), weeks, context.today()).await?;
    Ok(Json(generated))
}

/// ## Summary
/// GET /admin/calendar - One-time events and occurrences merged by date and time.
#[handler]
async fn calendar(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<CalendarEntry>>> {
    let weeks = weeks_param(req, depot)?;
    let context = get_context_from_depot(depot)?;

    let entries = load_calendar(context.store(), weeks, context.today()).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct SkipRequest {
    date: String,
    #[serde(default)]
    reason: Option<String>,
}

/// ## Summary
/// POST /admin/recurringEvents/{id}/skip - Cancel the occurrence on one date.
///
/// ## Errors
/// Returns HTTP 404 if the recurring event does not exist.
#[handler]
async fn skip(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Document<SkipException>>> {
    let context = get_context_from_depot(depot)?;
    let actor = actor_from_depot(depot)?;
    let definition_id = id_param(req)?;

    let body: SkipRequest = req.parse_json().await?;
    let date = parse_date(&body.date)?;
    let reason = body.reason.filter(|r| !r.trim().is_empty());

    let skipped = skip_occurrence(context.store(), definition_id, date, reason, &actor).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(skipped))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("occurrences").get(occurrences))
        .push(Router::with_path("calendar").get(calendar))
}

/// `POST {id}/skip`, mounted under the recurring events collection.
#[must_use]
pub fn skip_router() -> Router {
    Router::with_path("{id}/skip").post(skip)
}
