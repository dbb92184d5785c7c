pub mod dashboard;
pub mod validation;
