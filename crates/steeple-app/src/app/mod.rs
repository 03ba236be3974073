pub mod api;
pub mod uploads;
