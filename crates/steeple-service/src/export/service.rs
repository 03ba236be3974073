use std::collections::HashSet;

use steeple_core::collection::Collection;
use steeple_core::util::date::format_date;
use steeple_core::util::slug::generate_slug;
use steeple_db::model::activity::ActivityLogEntry;
use steeple_db::model::carousel::CarouselSlide;
use steeple_db::model::contact::ContactMessage;
use steeple_db::model::event::Event;
use steeple_db::model::export_log::ExportLogEntry;
use steeple_db::model::gallery::GalleryItem;
use steeple_db::model::leader::Leader;
use steeple_db::model::newsletter::NewsletterSignup;
use steeple_db::model::prayer::PrayerRequest;
use steeple_db::model::recurring::{RecurringEventDefinition, SkipException};
use steeple_db::model::testimony::Testimony;
use steeple_db::model::{Document, Record};
use steeple_db::store::DocumentStore;
use steeple_db::store::repository::Repository;

use super::{ExportFormat, ExportOptions, Exportable, export_records};
use crate::error::{ServiceError, ServiceResult};
use crate::record::default_order;

/// A finished export ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub record_count: usize,
    pub bytes: Vec<u8>,
}

/// Human title of an exportable collection, or `None` if it cannot be exported.
#[must_use]
pub const fn export_title(collection: Collection) -> Option<&'static str> {
    match collection {
        Collection::Events => Some("Events"),
        Collection::RecurringEvents => Some("Recurring Events"),
        Collection::SkippedRecurringEvents => Some("Skipped Occurrences"),
        Collection::Pastors => Some("Pastors"),
        Collection::TeamLeads => Some("Team Leads"),
        Collection::Gallery => Some("Gallery"),
        Collection::Carousel => Some("Carousel Slides"),
        Collection::Testimonies => Some("Testimonies"),
        Collection::PrayerRequests => Some("Prayer Requests"),
        Collection::ContactMessages => Some("Contact Messages"),
        Collection::NewsletterSignups => Some("Newsletter Signups"),
        Collection::ActivityLog => Some("Activity Log"),
        Collection::Settings | Collection::ExportLogs | Collection::AdminUsers => None,
    }
}

/// Loads a collection in its listing order, narrowed to `selection` when given.
async fn load_selection<T: Record>(
    store: &dyn DocumentStore,
    collection: Collection,
    selection: Option<&[uuid::Uuid]>,
) -> ServiceResult<Vec<Document<T>>> {
    let order = default_order(collection);
    let documents = Repository::<T>::in_collection(store, collection)
        .list(order.as_ref())
        .await?;

    let Some(ids) = selection else {
        return Ok(documents);
    };

    let wanted: HashSet<uuid::Uuid> = ids.iter().copied().collect();
    let selected: Vec<Document<T>> = documents
        .into_iter()
        .filter(|d| wanted.contains(&d.id))
        .collect();

    if selected.len() != wanted.len() {
        let found: HashSet<uuid::Uuid> = selected.iter().map(|d| d.id).collect();
        let missing = wanted
            .difference(&found)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ServiceError::NotFound(format!(
            "{collection} records not found: {missing}"
        )));
    }
    Ok(selected)
}

async fn export_typed<T>(
    store: &dyn DocumentStore,
    collection: Collection,
    selection: Option<&[uuid::Uuid]>,
    format: ExportFormat,
    options: &ExportOptions,
) -> ServiceResult<(usize, Vec<u8>)>
where
    T: Record,
    Document<T>: Exportable,
{
    let records = load_selection::<T>(store, collection, selection).await?;
    let bytes = export_records(&records, format, options)?;
    Ok((records.len(), bytes))
}

/// ## Summary
/// Exports a collection, or the selected records of it, in the requested format.
///
/// ## Side Effects
/// Records an export log entry on success. A failure to record it is traced
/// and does not fail the export.
///
/// ## Errors
/// - `ValidationError` if the collection cannot be exported
/// - `NotFound` if a selected id does not exist
/// - `ExportFailed` if encoding fails
#[tracing::instrument(skip(store, selection, today), fields(%collection, %format))]
pub async fn export_collection(
    store: &dyn DocumentStore,
    collection: Collection,
    selection: Option<&[uuid::Uuid]>,
    format: ExportFormat,
    today: chrono::NaiveDate,
    actor: &str,
) -> ServiceResult<ExportArtifact> {
    let title = export_title(collection).ok_or_else(|| {
        ServiceError::ValidationError(format!("{collection} cannot be exported"))
    })?;
    let options = ExportOptions {
        title: title.to_string(),
        generated_on: Some(today),
    };

    let (record_count, bytes) = match collection {
        Collection::Events => {
            export_typed::<Event>(store, collection, selection, format, &options).await
        }
        Collection::RecurringEvents => {
            export_typed::<RecurringEventDefinition>(store, collection, selection, format, &options).await
        }
        Collection::SkippedRecurringEvents => {
            export_typed::<SkipException>(store, collection, selection, format, &options).await
        }
        Collection::Pastors | Collection::TeamLeads => {
            export_typed::<Leader>(store, collection, selection, format, &options).await
        }
        Collection::Gallery => {
            export_typed::<GalleryItem>(store, collection, selection, format, &options).await
        }
        Collection::Carousel => {
            export_typed::<CarouselSlide>(store, collection, selection, format, &options).await
        }
        Collection::Testimonies => {
            export_typed::<Testimony>(store, collection, selection, format, &options).await
        }
        Collection::PrayerRequests => {
            export_typed::<PrayerRequest>(store, collection, selection, format, &options).await
        }
        Collection::ContactMessages => {
            export_typed::<ContactMessage>(store, collection, selection, format, &options).await
        }
        Collection::NewsletterSignups => {
            export_typed::<NewsletterSignup>(store, collection, selection, format, &options).await
        }
        Collection::ActivityLog => {
            export_typed::<ActivityLogEntry>(store, collection, selection, format, &options).await
        }
        Collection::Settings | Collection::ExportLogs | Collection::AdminUsers => Err(
            ServiceError::ValidationError(format!("{collection} cannot be exported")),
        ),
    }?;

    let file_name = format!(
        "{}-{}.{}",
        generate_slug(title),
        format_date(today),
        format.extension()
    );
    tracing::info!(record_count, %file_name, "Export completed");

    let log = ExportLogEntry {
        collection,
        format: format.as_str().to_string(),
        record_count,
        file_name: file_name.clone(),
        exported_by: actor.to_string(),
    };
    if let Err(e) = Repository::<ExportLogEntry>::new(store).create(&log).await {
        tracing::warn!(error = %e, "Failed to record export log entry");
    }

    Ok(ExportArtifact {
        file_name,
        content_type: format.content_type(),
        record_count,
        bytes,
    })
}
