pub mod auth;
pub mod checkin;
pub mod daily_entries;
pub mod demo;
pub mod insights;
