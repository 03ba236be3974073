use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Document collections known to the backend.
///
/// The string forms are the collection names used in storage and in the
/// admin API paths, so they must never change once data exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Events,
    RecurringEvents,
    SkippedRecurringEvents,
    Pastors,
    TeamLeads,
    Gallery,
    Carousel,
    Testimonies,
    PrayerRequests,
    ContactMessages,
    NewsletterSignups,
    Settings,
    ActivityLog,
    ExportLogs,
    AdminUsers,
}

impl Collection {
    pub const ALL: [Self; 15] = [
        Self::Events,
        Self::RecurringEvents,
        Self::SkippedRecurringEvents,
        Self::Pastors,
        Self::TeamLeads,
        Self::Gallery,
        Self::Carousel,
        Self::Testimonies,
        Self::PrayerRequests,
        Self::ContactMessages,
        Self::NewsletterSignups,
        Self::Settings,
        Self::ActivityLog,
        Self::ExportLogs,
        Self::AdminUsers,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::RecurringEvents => "recurringEvents",
            Self::SkippedRecurringEvents => "skippedRecurringEvents",
            Self::Pastors => "pastors",
            Self::TeamLeads => "teamLeads",
            Self::Gallery => "gallery",
            Self::Carousel => "carousel",
            Self::Testimonies => "testimonies",
            Self::PrayerRequests => "prayerRequests",
            Self::ContactMessages => "contactMessages",
            Self::NewsletterSignups => "newsletterSignups",
            Self::Settings => "settings",
            Self::ActivityLog => "activityLog",
            Self::ExportLogs => "exportLogs",
            Self::AdminUsers => "adminUsers",
        }
    }

    /// Whether records in this collection carry an `order` field that admins rearrange.
    #[must_use]
    pub const fn is_orderable(self) -> bool {
        matches!(
            self,
            Self::Pastors | Self::TeamLeads | Self::Gallery | Self::Carousel
        )
    }

    /// Whether records in this collection carry an `isRead` flag.
    #[must_use]
    pub const fn has_read_flag(self) -> bool {
        matches!(self, Self::ContactMessages | Self::PrayerRequests)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown collection: {s}")))
    }
}
