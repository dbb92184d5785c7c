pub mod aliases;
pub mod requests;
pub mod responses;
