use std::sync::Arc;

use stagedoor_core::{AppError, AppResult, UserIdentity};
use stagedoor_domain::{CapabilityFlag, EntityRef, Event, EventId};

use crate::access_ports::{CreateEventInput, EventRepository, UpdateEventInput};
use crate::event_access_service::{EventAccess, EventAccessService};

/// An event together with the caller's resolved access.
#[derive(Debug, Clone)]
pub struct EventDetail {
    /// The event record.
    pub event: Event,
    /// The caller's access to it.
    pub access: EventAccess,
}

/// Application service for event reads and permission-guarded writes.
#[derive(Clone)]
pub struct EventService {
    access_service: EventAccessService,
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    /// Creates the service from the access engine and an event repository.
    #[must_use]
    pub fn new(access_service: EventAccessService, repository: Arc<dyn EventRepository>) -> Self {
        Self {
            access_service,
            repository,
        }
    }

    /// Creates an event owned by the acting user.
    ///
    /// Referencing an organizer or venue requires affiliation with it; a
    /// platform-admin role bypasses the affiliation requirement.
    pub async fn create_event(
        &self,
        actor: &UserIdentity,
        input: CreateEventInput,
    ) -> AppResult<Event> {
        let event = Event::new(
            EventId::new(),
            input.name,
            Some(actor.user_id()),
            input.organizer_id,
            input.venue_id,
            input.starts_at,
        )?;

        self.require_entity_affiliations(actor, &event).await?;
        self.repository.insert_event(&event).await?;

        Ok(event)
    }

    /// Returns an event together with the caller's resolved access.
    pub async fn get_event(&self, actor: &UserIdentity, event_id: EventId) -> AppResult<EventDetail> {
        let event = self.require_event(event_id).await?;
        let access = self
            .access_service
            .resolve_access_for_event(actor.user_id(), &event)
            .await;

        if !access.has_access() {
            return Err(AppError::Forbidden(format!(
                "user '{}' has no access to event '{event_id}'",
                actor.user_id()
            )));
        }

        Ok(EventDetail { event, access })
    }

    /// Applies changes to an event, gated on the edit capability.
    pub async fn update_event(
        &self,
        actor: &UserIdentity,
        event_id: EventId,
        input: UpdateEventInput,
    ) -> AppResult<Event> {
        let mut event = self.require_event(event_id).await?;
        let access = self
            .access_service
            .resolve_access_for_event(actor.user_id(), &event)
            .await;

        if !access.allows(CapabilityFlag::EditEvents) {
            return Err(AppError::Forbidden(format!(
                "user '{}' may not edit event '{event_id}'",
                actor.user_id()
            )));
        }

        if let Some(name) = input.name {
            event.rename(name)?;
        }
        if let Some(starts_at) = input.starts_at {
            event.reschedule(Some(starts_at));
        }

        self.repository.update_event(&event).await?;

        Ok(event)
    }

    /// Lists events visible to the acting user.
    pub async fn list_events(&self, actor: &UserIdentity) -> AppResult<Vec<Event>> {
        if self
            .access_service
            .user_is_platform_admin(actor.user_id())
            .await?
        {
            return self.repository.list_events().await;
        }

        self.repository.list_events_for_user(actor.user_id()).await
    }

    async fn require_event(&self, event_id: EventId) -> AppResult<Event> {
        self.repository
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event '{event_id}' does not exist")))
    }

    async fn require_entity_affiliations(
        &self,
        actor: &UserIdentity,
        event: &Event,
    ) -> AppResult<()> {
        let mut referenced = Vec::new();
        if let Some(organizer_id) = event.organizer_id() {
            referenced.push(EntityRef::Organizer(organizer_id));
        }
        if let Some(venue_id) = event.venue_id() {
            referenced.push(EntityRef::Venue(venue_id));
        }

        if referenced.is_empty() {
            return Ok(());
        }

        if self
            .access_service
            .user_is_platform_admin(actor.user_id())
            .await?
        {
            return Ok(());
        }

        for entity in referenced {
            if !self
                .access_service
                .is_affiliated(entity, actor.user_id())
                .await
            {
                return Err(AppError::Forbidden(format!(
                    "user '{}' is not affiliated with {entity}",
                    actor.user_id()
                )));
            }
        }

        Ok(())
    }
}
