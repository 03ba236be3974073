//! Mapping of records to export entries.
//!
//! Testimonies and prayer requests marked anonymous are exported under
//! "Anonymous" and never carry the submitter's name, email or photo.

use steeple_core::util::date::format_date;
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

use super::ExportEntry;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A record that can be rendered into an export.
pub trait Exportable {
    /// Column name for [`ExportEntry::heading`] in tabular output.
    const HEADING_LABEL: &'static str;

    fn export_entry(&self) -> ExportEntry;
}

fn submitted<T>(document: &Document<T>) -> String {
    document.created_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn time_window(start: Option<&str>, end: Option<&str>) -> String {
    match (start.filter(|s| !s.is_empty()), end.filter(|s| !s.is_empty())) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        (Some(start), None) => start.to_string(),
        (None, Some(end)) => format!("until {end}"),
        (None, None) => String::new(),
    }
}

impl Exportable for Document<Event> {
    const HEADING_LABEL: &'static str = "Title";

    fn export_entry(&self) -> ExportEntry {
        let e = &self.data;
        ExportEntry::new(&e.title)
            .field("Date", format_date(e.date))
            .field(
                "Time",
                time_window(e.start_time.as_deref(), e.end_time.as_deref()),
            )
            .field("Location", &e.location)
            .optional("Category", e.category.as_deref())
            .field("Description", &e.description)
            .flag("Featured", e.is_featured)
    }
}

impl Exportable for Document<RecurringEventDefinition> {
    const HEADING_LABEL: &'static str = "Title";

    fn export_entry(&self) -> ExportEntry {
        let d = &self.data;
        let weekday = WEEKDAYS
            .get(usize::from(d.day_of_week))
            .copied()
            .unwrap_or("Unknown");
        ExportEntry::new(&d.title)
            .field("Every", weekday)
            .field(
                "Time",
                time_window(Some(&d.start_time), Some(&d.end_time)),
            )
            .field("Location", &d.location)
            .field("Description", &d.description)
            .flag("Active", d.is_active)
    }
}

impl Exportable for Document<SkipException> {
    const HEADING_LABEL: &'static str = "Date";

    fn export_entry(&self) -> ExportEntry {
        let s = &self.data;
        ExportEntry::new(format_date(s.skip_date))
            .field("Recurring Event", s.recurring_event_id.to_string())
            .optional("Reason", s.reason.as_deref())
    }
}

impl Exportable for Document<Leader> {
    const HEADING_LABEL: &'static str = "Name";

    fn export_entry(&self) -> ExportEntry {
        let l = &self.data;
        ExportEntry::new(&l.name)
            .field("Role", &l.role)
            .optional("Email", l.email.as_deref())
            .optional("Phone", l.phone.as_deref())
            .optional("Bio", l.bio.as_deref())
            .flag("Active", l.is_active)
    }
}

impl Exportable for Document<GalleryItem> {
    const HEADING_LABEL: &'static str = "Title";

    fn export_entry(&self) -> ExportEntry {
        let g = &self.data;
        ExportEntry::new(&g.title)
            .optional("Category", g.category.as_deref())
            .optional("Description", g.description.as_deref())
            .field("Image", &g.image_url)
    }
}

impl Exportable for Document<CarouselSlide> {
    const HEADING_LABEL: &'static str = "Title";

    fn export_entry(&self) -> ExportEntry {
        let c = &self.data;
        ExportEntry::new(c.title.as_deref().unwrap_or("Untitled slide"))
            .optional("Subtitle", c.subtitle.as_deref())
            .optional("Link", c.link_url.as_deref())
            .field("Image", &c.image_url)
            .flag("Active", c.is_active)
    }
}

impl Exportable for Document<Testimony> {
    const HEADING_LABEL: &'static str = "Name";

    fn export_entry(&self) -> ExportEntry {
        let t = &self.data;
        let entry = ExportEntry::new(t.display_name());
        let entry = if t.is_anonymous {
            entry
        } else {
            entry
                .optional("Email", t.email.as_deref())
                .optional("Photo", t.photo.as_deref())
        };
        entry
            .field("Testimony", t.text())
            .flag("Approved", t.is_approved)
            .flag("Featured", t.is_featured)
            .field("Submitted", submitted(self))
    }
}

impl Exportable for Document<PrayerRequest> {
    const HEADING_LABEL: &'static str = "Name";

    fn export_entry(&self) -> ExportEntry {
        let p = &self.data;
        let entry = ExportEntry::new(p.display_name());
        let entry = if p.is_anonymous {
            entry
        } else {
            entry.optional("Email", p.email.as_deref())
        };
        entry
            .field("Request", &p.request)
            .field("Status", p.status.as_str())
            .flag("Urgent", p.is_urgent)
            .field("Submitted", submitted(self))
    }
}

impl Exportable for Document<ContactMessage> {
    const HEADING_LABEL: &'static str = "Name";

    fn export_entry(&self) -> ExportEntry {
        let m = &self.data;
        ExportEntry::new(&m.name)
            .field("Email", &m.email)
            .optional("Phone", m.phone.as_deref())
            .optional("Subject", m.subject.as_deref())
            .field("Message", &m.message)
            .flag("Read", m.is_read)
            .field("Submitted", submitted(self))
    }
}

impl Exportable for Document<NewsletterSignup> {
    const HEADING_LABEL: &'static str = "Email";

    fn export_entry(&self) -> ExportEntry {
        let n = &self.data;
        ExportEntry::new(&n.email)
            .optional("Name", n.name.as_deref())
            .flag("Active", n.is_active)
            .field("Signed Up", submitted(self))
    }
}

impl Exportable for Document<ActivityLogEntry> {
    const HEADING_LABEL: &'static str = "When";

    fn export_entry(&self) -> ExportEntry {
        let a = &self.data;
        ExportEntry::new(submitted(self))
            .field("Action", format!("{:?}", a.action))
            .field("Collection", a.collection.as_str())
            .optional("Details", a.details.as_deref())
            .field("By", &a.actor)
    }
}
