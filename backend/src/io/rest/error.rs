use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use thiserror::Error;
use tracing::error;

use crate::domain::errors::{CryptoVoteError, NameValidationError};

/// Every failure a handler can answer with.
///
/// The display string is the message sent to the client, so storage details
/// never reach it; they are logged when the domain error is converted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid cryptocurrency ID")]
    InvalidId,

    #[error("Invalid request payload")]
    InvalidPayload,

    #[error(transparent)]
    InvalidName(NameValidationError),

    #[error("Cryptocurrency does not exist")]
    NotFound,

    #[error("Cryptocurrency with this name already exists")]
    Conflict,

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(&'static str),
}

/// Message for a 500 raised outside any handler operation
pub const INTERNAL_ERROR: &str = "Internal server error";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidPayload | ApiError::InvalidName(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Replace the message of a 500 with the failing operation's own.
    /// Other errors pass through unchanged.
    pub fn on_internal(self, message: &'static str) -> Self {
        match self {
            ApiError::Internal(_) => ApiError::Internal(message),
            other => other,
        }
    }
}

impl From<CryptoVoteError> for ApiError {
    fn from(err: CryptoVoteError) -> Self {
        match err {
            CryptoVoteError::InvalidName(reason) => ApiError::InvalidName(reason),
            CryptoVoteError::NotFound(_) => ApiError::NotFound,
            CryptoVoteError::Conflict(_) => ApiError::Conflict,
            CryptoVoteError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                ApiError::Internal(INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
