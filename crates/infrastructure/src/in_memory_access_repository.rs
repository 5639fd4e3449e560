use std::collections::HashMap;

use async_trait::async_trait;
use stagedoor_application::{AffiliationRepository, EventRepository, PlatformRoleRepository};
use stagedoor_core::{AppError, AppResult, UserId};
use stagedoor_domain::{CapabilityRecord, EntityRef, Event, EventId, PlatformRole};
use tokio::sync::RwLock;

/// In-memory access repository implementation.
///
/// Backs development seeding and tests; implements every port the access
/// engine consumes.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    platform_roles: RwLock<HashMap<UserId, Vec<PlatformRole>>>,
    events: RwLock<HashMap<EventId, Event>>,
    entity_creators: RwLock<HashMap<EntityRef, UserId>>,
    team_capabilities: RwLock<HashMap<(EntityRef, UserId), CapabilityRecord>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a platform role to a user.
    pub async fn assign_platform_role(&self, user_id: UserId, role: PlatformRole) {
        self.platform_roles
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(role);
    }

    /// Registers an organizing entity with its creator.
    pub async fn register_entity(&self, entity: EntityRef, creator_user_id: UserId) {
        self.entity_creators
            .write()
            .await
            .insert(entity, creator_user_id);
    }

    /// Adds a user to an entity's team with a stored capability record.
    pub async fn add_team_member(
        &self,
        entity: EntityRef,
        user_id: UserId,
        record: CapabilityRecord,
    ) {
        self.team_capabilities
            .write()
            .await
            .insert((entity, user_id), record);
    }
}

#[async_trait]
impl PlatformRoleRepository for InMemoryAccessRepository {
    async fn list_platform_roles(&self, user_id: UserId) -> AppResult<Vec<PlatformRole>> {
        Ok(self
            .platform_roles
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl EventRepository for InMemoryAccessRepository {
    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>> {
        Ok(self.events.read().await.get(&event_id).cloned())
    }

    async fn insert_event(&self, event: &Event) -> AppResult<()> {
        let mut events = self.events.write().await;

        if events.contains_key(&event.id()) {
            return Err(AppError::Conflict(format!(
                "event '{}' already exists",
                event.id()
            )));
        }

        events.insert(event.id(), event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> AppResult<()> {
        let mut events = self.events.write().await;

        if !events.contains_key(&event.id()) {
            return Err(AppError::NotFound(format!(
                "event '{}' does not exist",
                event.id()
            )));
        }

        events.insert(event.id(), event.clone());
        Ok(())
    }

    async fn list_events_for_user(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let events = self.events.read().await;
        let creators = self.entity_creators.read().await;
        let teams = self.team_capabilities.read().await;

        let mut values: Vec<Event> = events
            .values()
            .filter(|event| {
                if event.owner_user_id() == Some(user_id) {
                    return true;
                }

                let mut entities = Vec::new();
                if let Some(organizer_id) = event.organizer_id() {
                    entities.push(EntityRef::Organizer(organizer_id));
                }
                if let Some(venue_id) = event.venue_id() {
                    entities.push(EntityRef::Venue(venue_id));
                }

                entities.into_iter().any(|entity| {
                    creators.get(&entity) == Some(&user_id)
                        || teams.contains_key(&(entity, user_id))
                })
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        let events = self.events.read().await;

        let mut values: Vec<Event> = events.values().cloned().collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }
}

#[async_trait]
impl AffiliationRepository for InMemoryAccessRepository {
    async fn find_entity_creator(&self, entity: EntityRef) -> AppResult<Option<UserId>> {
        Ok(self.entity_creators.read().await.get(&entity).copied())
    }

    async fn find_team_capability(
        &self,
        entity: EntityRef,
        user_id: UserId,
    ) -> AppResult<Option<CapabilityRecord>> {
        Ok(self
            .team_capabilities
            .read()
            .await
            .get(&(entity, user_id))
            .copied())
    }
}
