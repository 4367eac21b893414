//! Account routes - balance aggregation over the loaded accounts

pub mod api;

pub use api::api_accounts_summary;
