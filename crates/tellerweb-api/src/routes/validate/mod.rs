//! Form validation routes

pub mod api;

pub use api::{api_validate, ValidationResponse};
