pub mod daily_entry;
pub mod rating;
pub mod user;
