use steeple_core::constants::SITE_SETTINGS_ID;
use steeple_db::model::Document;
use steeple_db::model::activity::{ActivityAction, ActivityLogEntry};
use steeple_db::model::settings::SiteSettings;
use steeple_db::store::DocumentStore;
use steeple_db::store::repository::Repository;

use super::activity::log_activity;
use super::validated;
use crate::error::ServiceResult;

/// ## Summary
/// Loads the site settings, falling back to defaults when none are stored.
///
/// ## Errors
/// Returns store or decoding errors.
pub async fn get_settings(store: &dyn DocumentStore) -> ServiceResult<SiteSettings> {
    let stored = Repository::<SiteSettings>::new(store)
        .get(SITE_SETTINGS_ID)
        .await?;
    Ok(stored.map(|document| document.data).unwrap_or_default())
}

/// ## Summary
/// Validates and stores the site settings.
///
/// ## Side Effects
/// Writes an `updated` activity entry.
///
/// ## Errors
/// Returns `ValidationError` for invalid settings, or a store error.
#[tracing::instrument(skip(store, settings))]
pub async fn update_settings(
    store: &dyn DocumentStore,
    settings: &SiteSettings,
    actor: &str,
) -> ServiceResult<Document<SiteSettings>> {
    validated(settings)?;
    let document = Repository::<SiteSettings>::new(store)
        .upsert(SITE_SETTINGS_ID, settings)
        .await?;
    tracing::info!("Site settings updated");

    log_activity(
        store,
        ActivityLogEntry {
            action: ActivityAction::Updated,
            collection: steeple_core::collection::Collection::Settings,
            document_id: Some(SITE_SETTINGS_ID),
            actor: actor.to_string(),
            details: None,
        },
    )
    .await;
    Ok(document)
}
