pub mod dashboard;
pub mod event;
pub mod health;
