//! Generic CRUD endpoints over the document collections.

use std::marker::PhantomData;

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, FlowCtrl, Handler, Request, Response, Router, Writer, async_trait};

use steeple_core::collection::Collection;
use steeple_db::model::Document;
use steeple_db::model::Record;
use steeple_db::store::SortDirection;
use steeple_service::auth::get_admin_from_depot;
use steeple_service::filter::{FilterSpec, Filterable, apply_filters, sort_by_date};
use steeple_service::record::RecordService;

use crate::context::get_context_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordAction {
    List,
    Create,
    Get,
    Update,
    Delete,
}

/// One CRUD operation on one collection of `T` records.
pub struct RecordEndpoint<T> {
    collection: Collection,
    action: RecordAction,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordEndpoint<T> {
    const fn new(collection: Collection, action: RecordAction) -> Self {
        Self {
            collection,
            action,
            _record: PhantomData,
        }
    }
}

/// ## Summary
/// Reads the `{id}` path parameter.
///
/// ## Errors
/// Returns `BadRequest` if it is missing or not a UUID.
pub fn id_param(req: &Request) -> AppResult<uuid::Uuid> {
    req.param::<String>("id")
        .and_then(|raw| raw.parse::<uuid::Uuid>().ok())
        .ok_or_else(|| AppError::BadRequest("id must be a UUID".to_string()))
}

/// ## Summary
/// Email of the authenticated administrator, recorded as the actor of mutations.
///
/// ## Errors
/// Returns `NotAuthenticated` if the auth hoop did not admit the request.
pub fn actor_from_depot(depot: &Depot) -> AppResult<String> {
    Ok(get_admin_from_depot(depot)?.email.clone())
}

/// ## Summary
/// Parses the `order` query parameter used to sort by primary date.
///
/// ## Errors
/// Returns `BadRequest` for anything other than `asc` or `desc`.
fn date_order(req: &Request) -> AppResult<Option<SortDirection>> {
    match req.query::<String>("order").as_deref() {
        None => Ok(None),
        Some("asc") => Ok(Some(SortDirection::Ascending)),
        Some("desc") => Ok(Some(SortDirection::Descending)),
        Some(other) => Err(AppError::BadRequest(format!(
            "order must be asc or desc, got '{other}'"
        ))),
    }
}

impl<T> RecordEndpoint<T>
where
    T: Record,
    Document<T>: Filterable,
{
    async fn list(&self, req: &mut Request, depot: &Depot) -> AppResult<Vec<Document<T>>> {
        let context = get_context_from_depot(depot)?;
        let spec = FilterSpec::from_query(
            req.queries()
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )?;
        let direction = date_order(req)?;

        let actor = actor_from_depot(depot)?;

        let records = RecordService::<T>::in_collection(context.store(), self.collection, &actor)
            .list(None)
            .await?;

        let mut records = if spec.is_empty() {
            records
        } else {
            apply_filters(&records, &spec)
        };
        if let Some(direction) = direction {
            sort_by_date(&mut records, direction);
        }
        tracing::debug!(collection = %self.collection, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn create(&self, req: &mut Request, depot: &Depot) -> AppResult<Document<T>> {
        let context = get_context_from_depot(depot)?;
        let actor = actor_from_depot(depot)?;
        let record: T = req.parse_json().await?;

        Ok(RecordService::<T>::in_collection(context.store(), self.collection, &actor)
            .create(&record)
            .await?)
    }

    async fn get(&self, req: &Request, depot: &Depot) -> AppResult<Document<T>> {
        let context = get_context_from_depot(depot)?;
        let actor = actor_from_depot(depot)?;
        let id = id_param(req)?;

        Ok(RecordService::<T>::in_collection(context.store(), self.collection, &actor)
            .get(id)
            .await?)
    }

    async fn update(&self, req: &mut Request, depot: &Depot) -> AppResult<Document<T>> {
        let context = get_context_from_depot(depot)?;
        let actor = actor_from_depot(depot)?;
        let id = id_param(req)?;
        let record: T = req.parse_json().await?;

        Ok(RecordService::<T>::in_collection(context.store(), self.collection, &actor)
            .update(id, &record)
            .await?)
    }

    async fn delete(&self, req: &Request, depot: &Depot) -> AppResult<Document<T>> {
        let context = get_context_from_depot(depot)?;
        let actor = actor_from_depot(depot)?;
        let id = id_param(req)?;

        Ok(RecordService::<T>::in_collection(context.store(), self.collection, &actor)
            .delete(id)
            .await?)
    }
}

#[async_trait]
impl<T> Handler for RecordEndpoint<T>
where
    T: Record,
    Document<T>: Filterable,
{
    #[tracing::instrument(skip_all, fields(
        collection = %self.collection,
        action = ?self.action,
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        _ctrl: &mut FlowCtrl,
    ) {
        match self.action {
            RecordAction::List => {
                let outcome = self.list(req, depot).await;
                outcome.map(Json).write(req, depot, res).await;
            }
            RecordAction::Create => {
                let outcome = self.create(req, depot).await;
                if outcome.is_ok() {
                    res.status_code(StatusCode::CREATED);
                }
                outcome.map(Json).write(req, depot, res).await;
            }
            RecordAction::Get => {
                let outcome = self.get(req, depot).await;
                outcome.map(Json).write(req, depot, res).await;
            }
            RecordAction::Update => {
                let outcome = self.update(req, depot).await;
                outcome.map(Json).write(req, depot, res).await;
            }
            RecordAction::Delete => {
                let outcome = self.delete(req, depot).await;
                outcome.map(Json).write(req, depot, res).await;
            }
        }
    }
}

/// ## Summary
/// Builds `/{collection}` (list, create) for records of type `T`.
///
/// `children` are pushed before the `{id}` routes so fixed segments such as
/// `reorder` win over the id matcher. Pass `item` to replace the default
/// `/{id}` router.
#[must_use]
pub fn collection_router<T>(collection: Collection, children: Vec<Router>, item: Option<Router>) -> Router
where
    T: Record,
    Document<T>: Filterable,
{
    let mut router = Router::with_path(collection.as_str())
        .get(RecordEndpoint::<T>::new(collection, RecordAction::List))
        .post(RecordEndpoint::<T>::new(collection, RecordAction::Create));

    for child in children {
        router = router.push(child);
    }

    router.push(item.unwrap_or_else(|| {
        item_router::<T>(collection).delete(RecordEndpoint::<T>::new(collection, RecordAction::Delete))
    }))
}

/// ## Summary
/// Builds `/{id}` with `GET` and `PUT` for records of type `T`. The caller
/// decides how `DELETE` behaves.
#[must_use]
pub fn item_router<T>(collection: Collection) -> Router
where
    T: Record,
    Document<T>: Filterable,
{
    Router::with_path("{id}")
        .get(RecordEndpoint::<T>::new(collection, RecordAction::Get))
        .put(RecordEndpoint::<T>::new(collection, RecordAction::Update))
}
