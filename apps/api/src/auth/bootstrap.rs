use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use stagedoor_core::{AppError, UserId, UserIdentity};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub token: String,
    pub user_id: Option<Uuid>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Token-gated session establishment.
///
/// Credential-based authentication lives in the identity service; this
/// endpoint lets operators and integration tests obtain a session for a
/// known user id.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let user_id = payload.user_id.map(UserId::from_uuid).unwrap_or_default();
    let display_name = payload
        .display_name
        .unwrap_or_else(|| user_id.to_string());

    state
        .user_repository
        .ensure_user(user_id, display_name.as_str(), payload.email.as_deref())
        .await?;

    let identity = UserIdentity::new(user_id, display_name, payload.email);

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    Ok(StatusCode::NO_CONTENT)
}
