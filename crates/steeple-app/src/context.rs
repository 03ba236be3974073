//! Long-lived services shared with every request.

use std::sync::Arc;

use salvo::async_trait;

use steeple_core::error::CoreError;
use steeple_db::storage::ObjectStore;
use steeple_db::store::DocumentStore;
use steeple_service::calendar::Clock;

use crate::error::{AppError, AppResult};

/// The document store, object store and clock a handler works against.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            objects,
            clock,
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn objects(&self) -> &dyn ObjectStore {
        self.objects.as_ref()
    }

    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}

/// Hoop that injects the [`AppContext`] into the depot.
pub struct ContextHandler {
    pub context: AppContext,
}

#[async_trait]
impl salvo::Handler for ContextHandler {
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.context.clone());
    }
}

/// ## Summary
/// Retrieves the shared context from the depot.
///
/// ## Errors
/// Returns an error if the context hoop did not run for this request.
pub fn get_context_from_depot(depot: &salvo::Depot) -> AppResult<AppContext> {
    depot
        .obtain::<AppContext>()
        .cloned()
        .map_err(|_err| AppError::CoreError(CoreError::InvariantViolation("Context not found in depot")))
}
