//! Domain services for the church administration backend.
//!
//! ## Module Organization
//!
//! - `auth`: request authentication and admin password hashing
//! - `calendar`: recurring-event occurrences and the combined calendar view
//! - `export`: PDF, Word and CSV export of record selections
//! - `filter`: text, flag, date and status filters over record lists
//! - `record`: validated CRUD, batch updates, settings and the activity log
//! - `upload`: image uploads into the object store

pub mod auth;
pub mod calendar;
pub mod error;
pub mod export;
pub mod filter;
pub mod record;
pub mod upload;
