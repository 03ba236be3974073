use serde::{Deserialize, Serialize};

use steeple_core::collection::Collection;
use steeple_core::error::CoreResult;

use super::validate::require;
use super::{Record, default_true};

/// A home-page hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSlide {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for CarouselSlide {
    const COLLECTION: Collection = Collection::Carousel;

    fn validate(&self) -> CoreResult<()> {
        require("imageUrl", &self.image_url)
    }
}
