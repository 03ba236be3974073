//! HTTP-level integration tests for the Steeple admin API.

mod auth;
mod calendar;
mod export;
mod helpers;
mod records;
mod uploads;
