/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const ADMIN_ROUTE_COMPONENT: &str = "admin";
pub const ADMIN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ADMIN_ROUTE_COMPONENT);

/// Fallback shown wherever a submitter's identity is masked or missing.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Fallback shown when a testimony carries neither current nor legacy text.
pub const MISSING_TESTIMONY_TEXT: &str = "No testimony text";

/// Prefix of synthetic identifiers given to generated recurring occurrences.
pub const RECURRING_ID_PREFIX: &str = "recurring-";

/// Singleton document id under which site settings are stored.
pub const SITE_SETTINGS_ID: uuid::Uuid = uuid::Uuid::nil();
