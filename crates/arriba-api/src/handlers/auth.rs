//! Authentication handlers

use arriba_core::{Credential, LoginRequest, UserInfo};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{credential_from_header, BearerCredential};
use crate::error::{codes, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<Credential>, ApiError> {
    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    info!(email = %request.email, "Login attempt");
    let credential = state
        .service()
        .authenticate(&request.email, &request.password)
        .await
        .map_err(|e| {
            warn!(email = %request.email, status = e.status_code(), "Login failed");
            ApiError::service(codes::AUTH_FAILED)(e)
        })?;

    state
        .token_store()
        .set(&credential.access_token, credential.clone())
        .await;
    info!(email = %request.email, "Login successful");
    Ok(Json(credential))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<Credential>, ApiError> {
    if request.refresh_token.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Refresh token is required".to_string(),
        ));
    }

    let credential = state
        .service()
        .refresh(&request.refresh_token)
        .await
        .map_err(ApiError::service(codes::REFRESH_FAILED))?;

    let store = state.token_store();
    let retired = store.retire_refresh_token(&request.refresh_token).await;
    store.set(&credential.access_token, credential.clone()).await;
    info!(retired, "Token refresh successful");
    Ok(Json(credential))
}

/// POST /api/auth/logout
///
/// Always succeeds; drops the stored credential when a bearer token is sent.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MessageResponse> {
    if let Some(credential) = credential_from_header(&headers) {
        if state
            .token_store()
            .remove(&credential.access_token)
            .await
            .is_some()
        {
            info!("Stored credential removed on logout");
        }
    }

    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
) -> Result<Json<UserInfo>, ApiError> {
    let user = state
        .service()
        .user_info(&credential)
        .await
        .map_err(ApiError::service(codes::FETCH_FAILED))?;
    Ok(Json(user))
}
