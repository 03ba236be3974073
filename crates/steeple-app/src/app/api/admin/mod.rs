//! Authenticated administration API.
//!
//! Every route below `/api/admin` passes through the [`AuthMiddleware`].

mod activity;
mod batch;
mod calendar;
mod export;
mod gallery;
mod records;
mod settings;
mod uploads;

use salvo::Router;

use steeple_core::collection::Collection;
use steeple_db::model::carousel::CarouselSlide;
use steeple_db::model::contact::ContactMessage;
use steeple_db::model::event::Event;
use steeple_db::model::leader::Leader;
use steeple_db::model::newsletter::NewsletterSignup;
use steeple_db::model::prayer::PrayerRequest;
use steeple_db::model::recurring::{RecurringEventDefinition, SkipException};
use steeple_db::model::testimony::Testimony;

use self::batch::{mark_read_router, reorder_router};
use self::records::collection_router;
use super::ADMIN_ROUTE_COMPONENT;
use crate::middleware::auth::AuthMiddleware;

/// CRUD routers for every collection administrators edit directly.
fn collections() -> Vec<Router> {
    vec![
        collection_router::<Event>(Collection::Events, vec![], None),
        collection_router::<RecurringEventDefinition>(
            Collection::RecurringEvents,
            vec![calendar::skip_router()],
            None,
        ),
        collection_router::<SkipException>(Collection::SkippedRecurringEvents, vec![], None),
        collection_router::<Leader>(
            Collection::Pastors,
            vec![reorder_router(Collection::Pastors)],
            None,
        ),
        collection_router::<Leader>(
            Collection::TeamLeads,
            vec![reorder_router(Collection::TeamLeads)],
            None,
        ),
        gallery::routes(),
        collection_router::<CarouselSlide>(
            Collection::Carousel,
            vec![reorder_router(Collection::Carousel)],
            None,
        ),
        collection_router::<Testimony>(Collection::Testimonies, vec![], None),
        collection_router::<PrayerRequest>(
            Collection::PrayerRequests,
            vec![mark_read_router(Collection::PrayerRequests)],
            None,
        ),
        collection_router::<ContactMessage>(
            Collection::ContactMessages,
            vec![mark_read_router(Collection::ContactMessages)],
            None,
        ),
        collection_router::<NewsletterSignup>(Collection::NewsletterSignups, vec![], None),
    ]
}

#[must_use]
pub fn routes() -> Router {
    let mut router = Router::with_path(ADMIN_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(calendar::routes())
        .push(settings::routes())
        .push(activity::routes())
        .push(export::routes())
        .push(uploads::routes());

    for collection in collections() {
        router = router.push(collection);
    }
    router
}
