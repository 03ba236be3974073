pub mod date;
pub mod slug;
