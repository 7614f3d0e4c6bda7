pub mod checkin;
pub mod insights;
pub mod metrics;
pub mod store;
