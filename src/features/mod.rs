pub mod dashboard;
pub mod reports;
