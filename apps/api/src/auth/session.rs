use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use stagedoor_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::dto::MeResponse;
use crate::error::ApiResult;

pub async fn me_handler(Extension(user): Extension<UserIdentity>) -> Json<MeResponse> {
    Json(MeResponse::from(user))
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}
