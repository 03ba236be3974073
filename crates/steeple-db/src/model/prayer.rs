use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::constants::ANONYMOUS_DISPLAY_NAME;
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::{non_blank, optional_email, require};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrayerStatus {
    #[default]
    Pending,
    Praying,
    Answered,
}

impl PrayerStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Praying => "praying",
            Self::Answered => "answered",
        }
    }
}

impl std::str::FromStr for PrayerStatus {
    type Err = steeple_core::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "praying" => Ok(Self::Praying),
            "answered" => Ok(Self::Answered),
            other => Err(steeple_core::error::CoreError::InvalidInput(format!(
                "unknown prayer status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub request: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub status: PrayerStatus,
}

impl PrayerRequest {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            return ANONYMOUS_DISPLAY_NAME;
        }
        non_blank(self.name.as_deref()).unwrap_or(ANONYMOUS_DISPLAY_NAME)
    }
}

impl Record for PrayerRequest {
    const COLLECTION: Collection = Collection::PrayerRequests;

    fn validate(&self) -> CoreResult<()> {
        require("request", &self.request)?;
        optional_email("email", self.email.as_deref())
    }
}
