//! All-or-nothing updates across many records of one collection.

use salvo::writing::Json;
use salvo::{Depot, FlowCtrl, Handler, Request, Response, Router, Writer, async_trait};
use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_service::record::batch::{mark_read, reorder};

use super::records::actor_from_depot;
use crate::context::get_context_from_depot;
use crate::error::AppResult;

/// Body of batch requests.
#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<uuid::Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub updated: usize,
}

#[derive(Debug, Clone, Copy)]
enum BatchAction {
    MarkRead,
    Reorder,
}

struct BatchEndpoint {
    collection: Collection,
    action: BatchAction,
}

impl BatchEndpoint {
    async fn apply(&self, req: &mut Request, depot: &Depot) -> AppResult<BatchResponse> {
        let context = get_context_from_depot(depot)?;
        let actor = actor_from_depot(depot)?;
        let body: IdsRequest = req.parse_json().await?;

        let updated = match self.action {
            BatchAction::MarkRead => {
                mark_read(context.store(), self.collection, &body.ids, &actor).await?
            }
            BatchAction::Reorder => {
                reorder(context.store(), self.collection, &body.ids, &actor).await?
            }
        };
        Ok(BatchResponse { updated })
    }
}

#[async_trait]
impl Handler for BatchEndpoint {
    #[tracing::instrument(skip_all, fields(collection = %self.collection, action = ?self.action))]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        _ctrl: &mut FlowCtrl,
    ) {
        let outcome = self.apply(req, depot).await;
        outcome.map(Json).write(req, depot, res).await;
    }
}

/// `POST mark-read` with `{ ids }`.
#[must_use]
pub fn mark_read_router(collection: Collection) -> Router {
    Router::with_path("mark-read").post(BatchEndpoint {
        collection,
        action: BatchAction::MarkRead,
    })
}

/// `POST reorder` with `{ ids }` in their new order.
#[must_use]
pub fn reorder_router(collection: Collection) -> Router {
    Router::with_path("reorder").post(BatchEndpoint {
        collection,
        action: BatchAction::Reorder,
    })
}
