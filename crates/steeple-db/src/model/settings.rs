use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::Record;
use super::validate::{optional_email, require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTime {
    pub label: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Site-wide settings, stored as a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub church_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service_times: Vec<ServiceTime>,
    #[serde(default)]
    pub social: SocialLinks,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            church_name: "Our Church".to_string(),
            tagline: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            service_times: vec![ServiceTime {
                label: "Sunday Worship".to_string(),
                time: "10:00".to_string(),
            }],
            social: SocialLinks::default(),
        }
    }
}

impl Record for SiteSettings {
    const COLLECTION: Collection = Collection::Settings;

    fn validate(&self) -> CoreResult<()> {
        require("churchName", &self.church_name)?;
        optional_email("email", Some(self.email.as_str()))
    }
}
