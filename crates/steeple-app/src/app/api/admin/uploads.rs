use salvo::http::StatusCode;
use salvo::http::header::CONTENT_TYPE;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use tokio::sync::watch;

use steeple_db::storage::UploadProgress;
use steeple_service::upload::{UploadedImage, upload_image};

use crate::config::get_config_from_depot;
use crate::context::get_context_from_depot;
use crate::error::{AppError, AppResult};

/// ## Summary
/// POST /admin/uploads/{folder}?name=file.jpg - Store a raw image body.
///
/// ## Errors
/// Returns HTTP 400 for non-image content, empty or oversized bodies, and
/// 503 if the object store cannot be written.
#[handler]
async fn upload(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<UploadedImage>> {
    let config = get_config_from_depot(depot)?;
    let context = get_context_from_depot(depot)?;

    let folder = req
        .param::<String>("folder")
        .ok_or_else(|| AppError::BadRequest("folder is required".to_string()))?;
    let file_name = req
        .query::<String>("name")
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    // One byte over the limit so an oversized body reaches the size check.
    let max_size = usize::try_from(config.storage.max_upload_bytes.saturating_add(1)).unwrap_or(usize::MAX);
    let bytes = req.payload_with_max_size(max_size).await?;

    let (progress, mut watcher) = watch::channel(UploadProgress::default());
    let reporter = tokio::spawn(async move {
        while watcher.changed().await.is_ok() {
            let current = *watcher.borrow_and_update();
            tracing::trace!(
                bytes_written = current.bytes_written,
                total_bytes = current.total_bytes,
                "Upload progress"
            );
        }
    });

    let uploaded = upload_image(
        context.objects(),
        &config.storage,
        &folder,
        &file_name,
        &content_type,
        bytes,
        Some(&progress),
    )
    .await;
    drop(progress);
    if let Err(e) = reporter.await {
        tracing::warn!(error = %e, "Upload progress reporter failed");
    }

    let uploaded = uploaded?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(uploaded))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("uploads/{folder}").post(upload)
}
