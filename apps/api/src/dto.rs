mod auth;
mod common;
mod events;

pub use auth::MeResponse;
pub use common::HealthResponse;
pub use events::{
    CreateEventRequest, EventAccessResponse, EventDetailResponse, EventResponse,
    PermissionCheckResponse, UpdateEventRequest,
};
