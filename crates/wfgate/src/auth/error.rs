//! Authentication errors.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Authentication failures.
///
/// Every variant except `Internal` maps to a 401 with a
/// `WWW-Authenticate: Bearer` challenge; none is ever fatal to the process.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing authorization header.
    #[error("missing authorization header")]
    MissingAuthHeader,

    /// Invalid authorization header format.
    #[error("invalid authorization header format")]
    InvalidAuthHeader,

    /// Invalid token (bad signature or malformed).
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Token subject does not resolve in the credential store.
    #[error("unknown token subject")]
    UnknownSubject,

    /// Bad login credentials.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Internal error.
    #[error("internal auth error: {0}")]
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Incorrect username or password")
            }
            _ => (StatusCode::UNAUTHORIZED, "Could not validate credentials"),
        };

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::MissingAuthHeader;
        assert_eq!(err.to_string(), "missing authorization header");

        let err = AuthError::InvalidToken("bad".to_string());
        assert_eq!(err.to_string(), "invalid token: bad");
    }

    #[test]
    fn test_rejections_carry_bearer_challenge() {
        for err in [
            AuthError::MissingAuthHeader,
            AuthError::InvalidToken("bad".to_string()),
            AuthError::TokenExpired,
            AuthError::UnknownSubject,
            AuthError::InvalidCredentials,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
        }
    }

    #[test]
    fn test_internal_is_not_a_challenge() {
        let response = AuthError::Internal("oops".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
