//! Dashboard routes - overview and transaction analytics

pub mod api;

pub use api::{api_dashboard, api_dashboard_analytics};
