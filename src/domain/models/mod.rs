pub mod dashboard;
pub mod event;
