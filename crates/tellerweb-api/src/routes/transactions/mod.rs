//! Transaction routes - filtering and statement exports
//!
//! Structure:
//! - api.rs: Filtered transaction list (JSON)
//! - export.rs: CSV download and printable statement

pub mod api;
pub mod export;

pub use api::{api_transactions, TransactionsResponse};
pub use export::{api_export_csv, api_statement};

use crate::ApiError;
use tellerweb_core::{TransactionFilter, TransactionQuery};

/// Parse the shared `search`/`type`/`account` query parameters
pub(crate) fn parse_filter(query: TransactionQuery) -> Result<TransactionFilter, ApiError> {
    TransactionFilter::try_from(query).map_err(ApiError::bad_request)
}
