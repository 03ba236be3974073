use salvo::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use steeple_core::collection::Collection;
use steeple_service::export::ExportFormat;
use steeple_service::export::service::export_collection;

use super::records::actor_from_depot;
use crate::context::get_context_from_depot;
use crate::error::{AppError, AppResult};

/// Optional body selecting which records to export.
#[derive(Debug, Default, Deserialize)]
struct ExportRequest {
    #[serde(default)]
    ids: Option<Vec<uuid::Uuid>>,
}

/// ## Summary
/// POST /admin/export/{collection}?format=pdf|word|csv - Download records as a file.
///
/// Without a body (or without `ids`) the whole collection is exported.
///
/// ## Errors
/// Returns HTTP 400 for unknown collections or formats, 404 for a selected id
/// that does not exist, and 500 if encoding fails.
#[handler]
async fn export(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let collection: Collection = req
        .param::<String>("collection")
        .ok_or_else(|| AppError::BadRequest("collection is required".to_string()))?
        .parse()?;
    let format: ExportFormat = req
        .query::<String>("format")
        .as_deref()
        .unwrap_or("pdf")
        .parse()?;

    let context = get_context_from_depot(depot)?;
    let actor = actor_from_depot(depot)?;

    let body = req.payload().await?;
    let request: ExportRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ExportRequest::default()
    } else {
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let artifact = export_collection(
        context.store(),
        collection,
        request.ids.as_deref(),
        format,
        context.today(),
        &actor,
    )
    .await?;

    tracing::info!(
        %collection,
        %format,
        records = artifact.record_count,
        file_name = %artifact.file_name,
        "Export ready"
    );

    if res.add_header(CONTENT_TYPE, artifact.content_type, true).is_err()
        || res
            .add_header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
                true,
            )
            .is_err()
    {
        tracing::warn!("Failed to set export response headers");
    }
    if let Err(e) = res.write_body(artifact.bytes) {
        tracing::error!(error = %e, "Failed to write export body");
    }
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("export/{collection}").post(export)
}
