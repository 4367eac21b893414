//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints

pub mod accounts;
pub mod beneficiaries;
pub mod cards;
pub mod dashboard;
pub mod transactions;
pub mod validate;
