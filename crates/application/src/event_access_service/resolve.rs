use stagedoor_core::{AppResult, UserId};
use stagedoor_domain::{
    AccessSource, CapabilityRecord, EntityAffiliation, EntityKind, EntityRef, Event, EventId,
    OwningEntity, PlatformRole,
};
use tracing::warn;

use super::{EventAccess, EventAccessService};

impl EventAccessService {
    /// Resolves how a user may access an event and with what capabilities.
    ///
    /// A missing event resolves to no access. Only the event lookup itself
    /// failing is surfaced as an error; every other sub-lookup failure
    /// degrades to a non-matching source.
    pub async fn resolve_event_access(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<EventAccess> {
        let Some(event) = self.events.find_event(event_id).await? else {
            return Ok(EventAccess::denied());
        };

        Ok(self.resolve_access_for_event(user_id, &event).await)
    }

    /// Resolves access for an already-loaded event record.
    ///
    /// Candidate sources are tried in fixed precedence order and the first
    /// match wins: platform admin, explicit owner, organizer creator,
    /// organizer team, then the venue sources with their owning/host split.
    pub async fn resolve_access_for_event(&self, user_id: UserId, event: &Event) -> EventAccess {
        if let Some(access) = self.platform_admin_source(user_id).await {
            return access;
        }

        if let Some(access) = Self::owner_source(user_id, event) {
            return access;
        }

        // Classified once per resolution, reused by both entity sources.
        let owning = self.classify_owner(event).await;

        if let Some(access) = self.organizer_source(user_id, event, owning).await {
            return access;
        }

        if let Some(access) = self.venue_source(user_id, event, owning).await {
            return access;
        }

        EventAccess::denied()
    }

    /// Returns whether the user holds a platform-admin role, propagating
    /// lookup failures to the caller.
    pub async fn user_is_platform_admin(&self, user_id: UserId) -> AppResult<bool> {
        let roles = self.roles.list_platform_roles(user_id).await?;
        Ok(roles.iter().any(PlatformRole::is_platform_admin))
    }

    async fn platform_admin_source(&self, user_id: UserId) -> Option<EventAccess> {
        match self.user_is_platform_admin(user_id).await {
            Ok(true) => Some(EventAccess::platform_admin()),
            Ok(false) => None,
            Err(error) => {
                warn!(%user_id, %error, "platform role lookup failed; skipping admin source");
                None
            }
        }
    }

    fn owner_source(user_id: UserId, event: &Event) -> Option<EventAccess> {
        (event.owner_user_id() == Some(user_id)).then(EventAccess::owner)
    }

    // Organizer creators get full capability regardless of the owning-entity
    // classification: organizer creation establishes primary stewardship of
    // the event even before explicit ownership tagging existed.
    async fn organizer_source(
        &self,
        user_id: UserId,
        event: &Event,
        owning: OwningEntity,
    ) -> Option<EventAccess> {
        let organizer_id = event.organizer_id()?;
        let is_owning_entity = owning == OwningEntity::Organizer;

        match self
            .entity_affiliation(EntityRef::Organizer(organizer_id), user_id)
            .await
        {
            EntityAffiliation::Creator => Some(EventAccess::entity(
                AccessSource::OrganizerCreator,
                CapabilityRecord::full(EntityKind::Organizer),
                is_owning_entity,
            )),
            EntityAffiliation::TeamMember(record) => Some(EventAccess::entity(
                AccessSource::OrganizerTeam,
                record,
                is_owning_entity,
            )),
            EntityAffiliation::Unaffiliated => None,
        }
    }

    // A venue merely hosting someone else's event must not receive
    // venue-administrative powers over it: both the creator and team branches
    // collapse to the reduced host record when the venue is not the owning
    // entity, discarding any stored record.
    async fn venue_source(
        &self,
        user_id: UserId,
        event: &Event,
        owning: OwningEntity,
    ) -> Option<EventAccess> {
        let venue_id = event.venue_id()?;
        let venue_owns_event = owning == OwningEntity::Venue;

        match self
            .entity_affiliation(EntityRef::Venue(venue_id), user_id)
            .await
        {
            EntityAffiliation::Creator if venue_owns_event => Some(EventAccess::entity(
                AccessSource::VenueCreator,
                CapabilityRecord::full(EntityKind::Venue),
                true,
            )),
            EntityAffiliation::TeamMember(record) if venue_owns_event => {
                Some(EventAccess::entity(AccessSource::VenueTeam, record, true))
            }
            EntityAffiliation::Creator | EntityAffiliation::TeamMember(_) => {
                Some(EventAccess::venue_host())
            }
            EntityAffiliation::Unaffiliated => None,
        }
    }
}
