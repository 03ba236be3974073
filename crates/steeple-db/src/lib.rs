//! Persistence layer: typed records, the document store and the object store.

pub mod db;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
