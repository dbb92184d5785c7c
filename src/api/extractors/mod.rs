pub mod event_id;
pub mod payload;
