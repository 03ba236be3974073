//! HTTP surface of the Steeple church administration backend.
//!
//! ## Module Organization
//!
//! - `app`: Salvo routers and handlers under `/api`
//! - `config`: settings hoop and depot accessor
//! - `context`: shared store, object store and clock for handlers
//! - `error`: HTTP-facing error type and status mapping
//! - `middleware`: administrator authentication

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
