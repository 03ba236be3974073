use chrono::NaiveDate;

use steeple_db::model::Document;
use steeple_db::model::activity::ActivityLogEntry;
use steeple_db::model::carousel::CarouselSlide;
use steeple_db::model::contact::ContactMessage;
use steeple_db::model::event::Event;
use steeple_db::model::gallery::GalleryItem;
use steeple_db::model::leader::Leader;
use steeple_db::model::newsletter::NewsletterSignup;
use steeple_db::model::prayer::PrayerRequest;
use steeple_db::model::recurring::{RecurringEventDefinition, SkipException};
use steeple_db::model::testimony::Testimony;

use super::Filterable;
use crate::calendar::CalendarEntry;

fn present<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    fields.into_iter().flatten().collect()
}

fn created_on<T>(document: &Document<T>) -> NaiveDate {
    document.created_at.date_naive()
}

impl Filterable for Document<Event> {
    fn search_fields(&self) -> Vec<&str> {
        let e = &self.data;
        present([
            Some(e.title.as_str()),
            Some(e.description.as_str()),
            Some(e.location.as_str()),
            e.category.as_deref(),
        ])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isFeatured").then_some(self.data.is_featured)
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.data.date)
    }
}

impl Filterable for Document<RecurringEventDefinition> {
    fn search_fields(&self) -> Vec<&str> {
        let d = &self.data;
        vec![d.title.as_str(), d.description.as_str(), d.location.as_str()]
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isActive").then_some(self.data.is_active)
    }
}

impl Filterable for Document<SkipException> {
    fn search_fields(&self) -> Vec<&str> {
        present([self.data.reason.as_deref()])
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.data.skip_date)
    }
}

impl Filterable for Document<Leader> {
    fn search_fields(&self) -> Vec<&str> {
        let l = &self.data;
        present([
            Some(l.name.as_str()),
            Some(l.role.as_str()),
            l.bio.as_deref(),
            l.email.as_deref(),
        ])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isActive").then_some(self.data.is_active)
    }
}

impl Filterable for Document<GalleryItem> {
    fn search_fields(&self) -> Vec<&str> {
        let g = &self.data;
        present([
            Some(g.title.as_str()),
            g.description.as_deref(),
            g.category.as_deref(),
        ])
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(created_on(self))
    }
}

impl Filterable for Document<CarouselSlide> {
    fn search_fields(&self) -> Vec<&str> {
        present([self.data.title.as_deref(), self.data.subtitle.as_deref()])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isActive").then_some(self.data.is_active)
    }
}

impl Filterable for Document<Testimony> {
    fn search_fields(&self) -> Vec<&str> {
        let t = &self.data;
        present([
            t.name.as_deref(),
            t.email.as_deref(),
            t.testimony.as_deref(),
            t.story.as_deref(),
        ])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        let t = &self.data;
        match name {
            "isAnonymous" => Some(t.is_anonymous),
            "isApproved" => Some(t.is_approved),
            "isFeatured" => Some(t.is_featured),
            _ => None,
        }
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(
            self.data
                .submitted_at
                .map_or_else(|| created_on(self), |at| at.date_naive()),
        )
    }
}

impl Filterable for Document<PrayerRequest> {
    fn search_fields(&self) -> Vec<&str> {
        let p = &self.data;
        present([
            p.name.as_deref(),
            p.email.as_deref(),
            Some(p.request.as_str()),
        ])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        let p = &self.data;
        match name {
            "isAnonymous" => Some(p.is_anonymous),
            "isUrgent" => Some(p.is_urgent),
            "isRead" => Some(p.is_read),
            _ => None,
        }
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(created_on(self))
    }

    fn status(&self) -> Option<&str> {
        Some(self.data.status.as_str())
    }
}

impl Filterable for Document<ContactMessage> {
    fn search_fields(&self) -> Vec<&str> {
        let m = &self.data;
        present([
            Some(m.name.as_str()),
            Some(m.email.as_str()),
            m.subject.as_deref(),
            Some(m.message.as_str()),
            m.phone.as_deref(),
        ])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isRead").then_some(self.data.is_read)
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(created_on(self))
    }
}

impl Filterable for Document<NewsletterSignup> {
    fn search_fields(&self) -> Vec<&str> {
        present([Some(self.data.email.as_str()), self.data.name.as_deref()])
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "isActive").then_some(self.data.is_active)
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(created_on(self))
    }
}

impl Filterable for Document<ActivityLogEntry> {
    fn search_fields(&self) -> Vec<&str> {
        let a = &self.data;
        present([
            Some(a.actor.as_str()),
            Some(a.collection.as_str()),
            a.details.as_deref(),
        ])
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(created_on(self))
    }
}

impl Filterable for CalendarEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
        ]
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
