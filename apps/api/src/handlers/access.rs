use axum::Json;
use axum::extract::{Extension, Path, State};
use stagedoor_core::UserIdentity;
use stagedoor_domain::{CapabilityFlag, EventId};
use uuid::Uuid;

use crate::dto::{EventAccessResponse, PermissionCheckResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn event_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<EventAccessResponse>> {
    let access = state
        .event_access_service
        .resolve_event_access(user.user_id(), EventId::from_uuid(event_id))
        .await?;

    Ok(Json(EventAccessResponse::from(access)))
}

pub async fn permission_check_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((event_id, flag)): Path<(Uuid, String)>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let flag = CapabilityFlag::from_transport(flag.as_str())?;

    let allowed = state
        .event_access_service
        .has_permission(user.user_id(), EventId::from_uuid(event_id), flag)
        .await?;

    Ok(Json(PermissionCheckResponse {
        flag: flag.as_str().to_owned(),
        allowed,
    }))
}
