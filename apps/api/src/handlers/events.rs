use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use stagedoor_application::{CreateEventInput, UpdateEventInput};
use stagedoor_core::{AppError, UserIdentity};
use stagedoor_domain::{EventId, OrganizerId, VenueId};
use uuid::Uuid;

use crate::dto::{CreateEventRequest, EventDetailResponse, EventResponse, UpdateEventRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_events_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let events = state
        .event_service
        .list_events(&user)
        .await?
        .into_iter()
        .map(EventResponse::from)
        .collect();

    Ok(Json(events))
}

pub async fn create_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let starts_at = parse_starts_at(payload.starts_at)?;

    let event = state
        .event_service
        .create_event(
            &user,
            CreateEventInput {
                name: payload.name,
                organizer_id: payload.organizer_id.map(OrganizerId::from_uuid),
                venue_id: payload.venue_id.map(VenueId::from_uuid),
                starts_at,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn get_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<EventDetailResponse>> {
    let detail = state
        .event_service
        .get_event(&user, EventId::from_uuid(event_id))
        .await?;

    Ok(Json(EventDetailResponse::from(detail)))
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let starts_at = parse_starts_at(payload.starts_at)?;

    let event = state
        .event_service
        .update_event(
            &user,
            EventId::from_uuid(event_id),
            UpdateEventInput {
                name: payload.name,
                starts_at,
            },
        )
        .await?;

    Ok(Json(EventResponse::from(event)))
}

fn parse_starts_at(value: Option<String>) -> ApiResult<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.as_str())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|error| {
                    AppError::Validation(format!("invalid starts_at timestamp: {error}")).into()
                })
        })
        .transpose()
}
