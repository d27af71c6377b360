//! Authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use super::{AuthError, TokenCodec};
use crate::users::{Identity, UserStore};

/// Extract a Bearer token from an Authorization header value.
pub fn bearer_token_from_header(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::InvalidAuthHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = parts.next().ok_or(AuthError::InvalidAuthHeader)?;
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    if parts.next().is_some() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

/// Authentication state shared across handlers and the gate middleware.
#[derive(Clone)]
pub struct AuthState {
    codec: Arc<TokenCodec>,
    users: Arc<dyn UserStore>,
}

impl AuthState {
    pub fn new(codec: Arc<TokenCodec>, users: Arc<dyn UserStore>) -> Self {
        Self { codec, users }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Validate a token and resolve it to an identity.
    ///
    /// Signature, expiry, and subject resolution are all re-checked on
    /// every call; validity is never cached across requests.
    pub async fn validate_token(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::TokenExpired);
        }

        let user = self
            .users
            .lookup(&claims.sub)
            .await
            .map_err(|e| AuthError::Internal(format!("credential store lookup: {e}")))?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(user.identity())
    }
}

/// Authenticated identity extracted from the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Extract the authenticated identity injected by [`auth_middleware`].
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Authentication gate.
///
/// Validates the bearer token, resolves its subject through the credential
/// store, and injects [`CurrentUser`] into request extensions. Any failure
/// rejects the request before the handler runs.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = bearer_token_from_header(header)?;
    let identity = auth.validate_token(token).await?;

    req.extensions_mut().insert(CurrentUser(identity));
    Ok(next.run(req).await)
}
