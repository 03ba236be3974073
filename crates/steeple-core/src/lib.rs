//! Shared building blocks for the Steeple church administration backend.
//!
//! Nothing in this crate touches the network or a database; it holds the
//! configuration model, the core error type, route constants, the collection
//! catalogue and small text/date helpers used by every other crate.

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod util;
