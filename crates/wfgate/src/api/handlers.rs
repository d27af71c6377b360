//! Request handlers.

use axum::{
    body::Bytes,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument};

use super::error::ApiResult;
use super::state::AppState;
use crate::auth::{AuthError, CurrentUser};
use crate::dispatch::normalize;
use crate::users::Identity;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Login form, the OAuth2 password-grant shape.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Issued-token response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /token`: exchange credentials for an access token.
///
/// Unknown username and wrong password are indistinguishable to the caller.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, AuthError> {
    let user = state
        .users
        .lookup(&form.username)
        .await
        .map_err(|e| AuthError::Internal(format!("credential store lookup: {e}")))?
        .filter(|user| user.verify_password(&form.password))
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = state.auth.codec().issue(&user.username)?;
    info!("issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// `GET /users/me/`: return the authenticated identity.
pub async fn me(user: CurrentUser) -> Json<Identity> {
    Json(user.0)
}

/// `POST /trigger`: normalize the payload and kick off a workflow.
///
/// Fire-and-forget admission: 202 means the collaborator accepted the
/// request, not that the workflow completed. Collaborator failures are
/// opaque and become 501; the caller owns resubmission.
#[instrument(skip_all, fields(username = %user.username()))]
pub async fn trigger(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Bytes,
) -> ApiResult<Response> {
    let request = normalize(&body)?;

    match state.workflow.call(request).await {
        Ok(()) => Ok((StatusCode::ACCEPTED, Json(json!({"triggered": true}))).into_response()),
        Err(err) => {
            error!("workflow trigger failed: {err:#}");
            Ok((StatusCode::NOT_IMPLEMENTED, "Not implemented").into_response())
        }
    }
}

/// `POST /exec`: normalize the payload and run the generic handler.
///
/// Unauthenticated by design. Same outcome mapping as the trigger path but
/// with empty response bodies.
#[instrument(skip_all)]
pub async fn exec(State(state): State<AppState>, body: Bytes) -> ApiResult<StatusCode> {
    let request = normalize(&body)?;

    match state.handler.call(request).await {
        Ok(()) => Ok(StatusCode::ACCEPTED),
        Err(err) => {
            error!("exec handler failed: {err:#}");
            Ok(StatusCode::NOT_IMPLEMENTED)
        }
    }
}
