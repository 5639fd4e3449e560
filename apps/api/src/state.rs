use std::sync::Arc;

use stagedoor_application::{EventAccessService, EventService, UserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub event_service: EventService,
    pub event_access_service: EventAccessService,
    pub user_repository: Arc<dyn UserRepository>,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
