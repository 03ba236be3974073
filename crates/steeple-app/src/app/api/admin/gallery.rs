use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use steeple_core::collection::Collection;
use steeple_db::model::Document;
use steeple_db::model::gallery::GalleryItem;
use steeple_service::upload::delete_gallery_item;

use super::batch::reorder_router;
use super::records::{actor_from_depot, collection_router, id_param, item_router};
use crate::context::get_context_from_depot;
use crate::error::AppResult;

/// ## Summary
/// DELETE /admin/gallery/{id} - Remove a gallery item and its stored image.
#[handler]
async fn delete(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Document<GalleryItem>>> {
    let context = get_context_from_depot(depot)?;
    let actor = actor_from_depot(depot)?;
    let id = id_param(req)?;

    let removed = delete_gallery_item(context.store(), context.objects(), id, &actor).await?;
    Ok(Json(removed))
}

#[must_use]
pub fn routes() -> Router {
    collection_router::<GalleryItem>(
        Collection::Gallery,
        vec![reorder_router(Collection::Gallery)],
        Some(item_router::<GalleryItem>(Collection::Gallery).delete(delete)),
    )
}
