// src/error.rs
// =============================================================================
// This module defines every error the search service can report.
//
// Each variant carries the message shown to the caller. The mapping from
// variant to HTTP status lives in one place (`ApiError::to_parts`) and axum
// calls it through the IntoResponse impl at the edge of every handler.
//
// Error kinds:
// - InvalidInput: bad request body, query parameters or regex (400)
// - UserNotFound: GitHub says the user does not exist (404)
// - FileFetch: a raw gist file could not be downloaded (upstream status or 500)
// - Upstream: the gist listing could not be fetched (upstream status or 500)
// - Internal: anything else (500)
// =============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found, Kindly provide correct username";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UserNotFound(String),

    #[error("{message}")]
    FileFetch { message: String, status: u16 },

    #[error("{message}")]
    Upstream { message: String, status: u16 },

    #[error("An error occurred: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn user_not_found() -> Self {
        ApiError::UserNotFound(USER_NOT_FOUND_MESSAGE.to_string())
    }

    /// HTTP status this error is reported with.
    ///
    /// Upstream statuses that don't form a valid code fall back to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::FileFetch { status, .. } | ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The single place where an error becomes `(status, {"error": message})`.
    pub fn to_parts(&self) -> (StatusCode, serde_json::Value) {
        (self.status_code(), json!({ "error": self.to_string() }))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        (status, Json(body)).into_response()
    }
}
