use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::constants::{ANONYMOUS_DISPLAY_NAME, MISSING_TESTIMONY_TEXT};
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::{non_blank, optional_email};

/// A member's testimony.
///
/// Older submissions stored their text under `story`; newer ones use
/// `testimony`. Anonymous submissions may omit `name` and `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimony: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Testimony {
    /// Resolves `testimony`, then legacy `story`, then a placeholder.
    #[must_use]
    pub fn text(&self) -> &str {
        non_blank(self.testimony.as_deref())
            .or_else(|| non_blank(self.story.as_deref()))
            .unwrap_or(MISSING_TESTIMONY_TEXT)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            return ANONYMOUS_DISPLAY_NAME;
        }
        non_blank(self.name.as_deref()).unwrap_or(ANONYMOUS_DISPLAY_NAME)
    }
}

impl Record for Testimony {
    const COLLECTION: Collection = Collection::Testimonies;

    fn validate(&self) -> CoreResult<()> {
        optional_email("email", self.email.as_deref())
    }
}
