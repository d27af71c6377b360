//! API errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::dispatch::InputError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level API errors.
///
/// Collaborator failures are not represented here: they are mapped to 501
/// directly at the dispatch handlers, since they are an outcome, not an
/// error the caller can correct.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent something the gateway refuses to forward.
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected fault inside the gateway itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
