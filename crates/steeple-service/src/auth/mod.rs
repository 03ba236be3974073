//! Administrator authentication.
//!
//! ## Module Organization
//!
//! - `account`: admin registration and credential checks
//! - `authenticate`: per-request authentication (single user, HTTP Basic)
//! - `depot`: the authenticated admin as stored in the Salvo depot
//! - `password`: Argon2 password hashing and verification

pub mod account;
pub mod authenticate;
pub mod depot;
pub mod password;

pub use authenticate::authenticate;
pub use depot::{depot_keys, get_admin_from_depot};
