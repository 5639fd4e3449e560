use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stagedoor_core::{AppResult, UserId};
use stagedoor_domain::{CapabilityRecord, EntityRef, Event, EventId, OrganizerId, PlatformRole, VenueId};

/// Repository port for platform role lookups.
#[async_trait]
pub trait PlatformRoleRepository: Send + Sync {
    /// Lists platform roles currently held by a user.
    async fn list_platform_roles(&self, user_id: UserId) -> AppResult<Vec<PlatformRole>>;
}

/// Repository port for event records.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Finds one event by id.
    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>>;

    /// Persists a new event.
    async fn insert_event(&self, event: &Event) -> AppResult<()>;

    /// Persists changes to an existing event.
    async fn update_event(&self, event: &Event) -> AppResult<()>;

    /// Lists events the user owns or reaches through an entity affiliation.
    async fn list_events_for_user(&self, user_id: UserId) -> AppResult<Vec<Event>>;

    /// Lists all events (administrative listing).
    async fn list_events(&self) -> AppResult<Vec<Event>>;
}

/// Repository port for user account records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Ensures a user row exists for the identifier.
    async fn ensure_user(
        &self,
        user_id: UserId,
        display_name: &str,
        email: Option<&str>,
    ) -> AppResult<()>;
}

/// Repository port for entity creator and team membership lookups.
#[async_trait]
pub trait AffiliationRepository: Send + Sync {
    /// Returns the creator of an organizing entity, if the entity exists.
    async fn find_entity_creator(&self, entity: EntityRef) -> AppResult<Option<UserId>>;

    /// Returns the stored team capability record for a user on an entity.
    ///
    /// The returned record's kind matches the entity's kind.
    async fn find_team_capability(
        &self,
        entity: EntityRef,
        user_id: UserId,
    ) -> AppResult<Option<CapabilityRecord>>;
}

/// Input for event creation.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    /// Event name.
    pub name: String,
    /// Organizer to associate the event with, if any.
    pub organizer_id: Option<OrganizerId>,
    /// Venue to associate the event with, if any.
    pub venue_id: Option<VenueId>,
    /// Scheduled start time, if known.
    pub starts_at: Option<DateTime<Utc>>,
}

/// Input for event updates. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventInput {
    /// New event name.
    pub name: Option<String>,
    /// New scheduled start time.
    pub starts_at: Option<DateTime<Utc>>,
}
