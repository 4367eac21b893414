//! Error types for tellerweb-core
//!
//! The derived-logic functions never fail for well-formed input. Errors come
//! from two places only: loading a snapshot (upstream failure) and asking the
//! exporter for a statement with nothing in it (input absence).

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No snapshot has been loaded yet
    NotLoaded,
    AccountNotFound,
    CardNotFound,
    /// Snapshot JSON could not be decoded
    ParseError,
    ValidationError,
    IoError,
    FileNotFound,
    /// Export requested for an empty transaction list
    NothingToExport,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::CardNotFound => write!(f, "CARD_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::NothingToExport => write!(f, "NOTHING_TO_EXPORT"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for tellerweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Snapshot not loaded")]
    NotLoaded,

    #[error("Account not found: {id}")]
    AccountNotFound { id: u64 },

    #[error("Card not found: {id}")]
    CardNotFound { id: u64 },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            CoreError::CardNotFound { .. } => ErrorCode::CardNotFound,
            CoreError::ParseError { .. } => ErrorCode::ParseError,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::IoError { .. } => ErrorCode::IoError,
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::Export(ExportError::NothingToExport) => ErrorCode::NothingToExport,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::AccountNotFound { .. } => ErrorSeverity::Info,
            CoreError::CardNotFound { .. } => ErrorSeverity::Info,
            CoreError::ParseError { .. } => ErrorSeverity::Error,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::IoError { .. } => ErrorSeverity::Error,
            CoreError::FileNotFound { .. } => ErrorSeverity::Error,
            CoreError::Export(_) => ErrorSeverity::Info,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Check data.snapshot_path in the configuration, then POST /api/reload.".to_string(),
                );
            }
            CoreError::AccountNotFound { .. } => {
                details = details.with_suggestion(
                    "Use /api/accounts/summary to list the loaded accounts.".to_string(),
                );
            }
            CoreError::CardNotFound { .. } => {
                details = details.with_suggestion(
                    "The card may have been issued after the last snapshot; reload and retry.".to_string(),
                );
            }
            CoreError::ParseError { message } => {
                details = details
                    .with_detail(serde_json::json!({ "parse_message": message }))
                    .with_suggestion(
                        "The snapshot must be a JSON object with accounts, cards, beneficiaries and transactions.".to_string(),
                    );
            }
            CoreError::FileNotFound { .. } => {
                details = details.with_suggestion("Ensure the snapshot file exists and is readable.".to_string());
            }
            CoreError::Export(ExportError::NothingToExport) => {
                details = details.with_suggestion("Clear or widen the transaction filters.".to_string());
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::ParseError {
            message: error.to_string(),
        }
    }
}

/// Statement export failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// The filtered list is empty; no file or document is produced
    #[error("No transactions to download")]
    NothingToExport,
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            data: serde_json::json!({}),
        }
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "tellerweb::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "tellerweb::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Error => log::error!(
                target: "tellerweb::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(ErrorCode::NothingToExport.to_string(), "NOTHING_TO_EXPORT");
    }

    #[test]
    fn test_export_error_maps_to_code() {
        let error: CoreError = ExportError::NothingToExport.into();
        assert_eq!(error.code(), ErrorCode::NothingToExport);
        assert_eq!(error.severity(), ErrorSeverity::Info);
        assert_eq!(error.to_string(), "No transactions to download");
    }

    #[test]
    fn test_parse_error_details() {
        let error: CoreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::ParseError);
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_io_error_keeps_message() {
        let error: CoreError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(error.code(), ErrorCode::IoError);
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("load_snapshot")
            .with_data("path", serde_json::json!("/tmp/snapshot.json"));
        assert_eq!(context.operation, "load_snapshot");
        assert_eq!(context.data["path"], "/tmp/snapshot.json");
    }
}
