//! Error types for tellerweb-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tellerweb_core::{CoreError, ErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error.code() {
                ErrorCode::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::AccountNotFound | ErrorCode::CardNotFound => StatusCode::NOT_FOUND,
                ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::NothingToExport => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::ParseError
                | ErrorCode::IoError
                | ErrorCode::FileNotFound => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::NotFound { .. } => ErrorBody {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
            },
            ApiError::BadRequest { message } => ErrorBody {
                code: "BAD_REQUEST".to_string(),
                message: message.clone(),
            },
            ApiError::Core(error) => ErrorBody {
                code: error.code().to_string(),
                message: error.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Core(error) => {
                    log::error!(target: "tellerweb::api", "{}", error.to_details())
                }
                other => log::error!(target: "tellerweb::api", "{}", other),
            }
        } else {
            log::debug!(target: "tellerweb::api", "{} {}", status, self);
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
