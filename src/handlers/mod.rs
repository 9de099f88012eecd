pub mod admin;
pub mod homepage;
pub mod learn;
