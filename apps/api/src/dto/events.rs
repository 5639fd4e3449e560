use serde::{Deserialize, Serialize};
use stagedoor_application::{EventAccess, EventDetail};
use stagedoor_domain::{CapabilityFlag, Event};
use ts_rs::TS;
use uuid::Uuid;

/// Incoming payload for event creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-event-request.ts"
)]
pub struct CreateEventRequest {
    pub name: String,
    pub organizer_id: Option<Uuid>,
    pub venue_id: Option<Uuid>,
    /// RFC3339 timestamp.
    pub starts_at: Option<String>,
}

/// Incoming payload for event updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-event-request.ts"
)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    /// RFC3339 timestamp.
    pub starts_at: Option<String>,
}

/// API representation of an event record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-response.ts"
)]
pub struct EventResponse {
    pub event_id: String,
    pub name: String,
    pub owner_user_id: Option<String>,
    pub organizer_id: Option<String>,
    pub venue_id: Option<String>,
    pub starts_at: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        Self {
            event_id: value.id().to_string(),
            name: value.name().to_owned(),
            owner_user_id: value.owner_user_id().map(|id| id.to_string()),
            organizer_id: value.organizer_id().map(|id| id.to_string()),
            venue_id: value.venue_id().map(|id| id.to_string()),
            starts_at: value.starts_at().map(|starts_at| starts_at.to_rfc3339()),
        }
    }
}

/// API representation of a resolved access decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-access-response.ts"
)]
pub struct EventAccessResponse {
    pub source: String,
    pub is_owner: bool,
    pub is_platform_admin: bool,
    pub is_owning_entity: bool,
    /// Capability flags the caller holds on this event.
    pub capabilities: Vec<String>,
}

impl From<EventAccess> for EventAccessResponse {
    fn from(value: EventAccess) -> Self {
        let capabilities = CapabilityFlag::all()
            .iter()
            .filter(|flag| value.allows(**flag))
            .map(|flag| flag.as_str().to_owned())
            .collect();

        Self {
            source: value.source.as_str().to_owned(),
            is_owner: value.is_owner,
            is_platform_admin: value.is_platform_admin,
            is_owning_entity: value.is_owning_entity,
            capabilities,
        }
    }
}

/// API representation of an event together with the caller's access.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/event-detail-response.ts"
)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    pub access: EventAccessResponse,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(value: EventDetail) -> Self {
        Self {
            event: EventResponse::from(value.event),
            access: EventAccessResponse::from(value.access),
        }
    }
}

/// API representation of a single permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub flag: String,
    pub allowed: bool,
}
