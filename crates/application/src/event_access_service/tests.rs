use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use stagedoor_core::{AppError, AppResult, UserId};
use stagedoor_domain::{
    AccessSource, CapabilityFlag, CapabilityRecord, EntityRef, Event, EventId,
    OrganizerCapabilities, OrganizerId, PlatformRole, VenueCapabilities, VenueId,
};

use crate::access_ports::{AffiliationRepository, EventRepository, PlatformRoleRepository};

use super::EventAccessService;

#[derive(Default)]
struct FakeRoleRepository {
    roles: HashMap<UserId, Vec<PlatformRole>>,
    fail: bool,
}

#[async_trait]
impl PlatformRoleRepository for FakeRoleRepository {
    async fn list_platform_roles(&self, user_id: UserId) -> AppResult<Vec<PlatformRole>> {
        if self.fail {
            return Err(AppError::Internal("role store unreachable".to_owned()));
        }

        Ok(self.roles.get(&user_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeEventRepository {
    events: HashMap<EventId, Event>,
    fail: bool,
}

#[async_trait]
impl EventRepository for FakeEventRepository {
    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>> {
        if self.fail {
            return Err(AppError::Internal("event store unreachable".to_owned()));
        }

        Ok(self.events.get(&event_id).cloned())
    }

    async fn insert_event(&self, _event: &Event) -> AppResult<()> {
        Ok(())
    }

    async fn update_event(&self, _event: &Event) -> AppResult<()> {
        Ok(())
    }

    async fn list_events_for_user(&self, _user_id: UserId) -> AppResult<Vec<Event>> {
        Ok(Vec::new())
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct FakeAffiliationRepository {
    creators: HashMap<EntityRef, UserId>,
    teams: HashMap<(EntityRef, UserId), CapabilityRecord>,
    fail: bool,
}

#[async_trait]
impl AffiliationRepository for FakeAffiliationRepository {
    async fn find_entity_creator(&self, entity: EntityRef) -> AppResult<Option<UserId>> {
        if self.fail {
            return Err(AppError::Internal("entity store unreachable".to_owned()));
        }

        Ok(self.creators.get(&entity).copied())
    }

    async fn find_team_capability(
        &self,
        entity: EntityRef,
        user_id: UserId,
    ) -> AppResult<Option<CapabilityRecord>> {
        if self.fail {
            return Err(AppError::Internal("team store unreachable".to_owned()));
        }

        Ok(self.teams.get(&(entity, user_id)).copied())
    }
}

struct Fixture {
    roles: FakeRoleRepository,
    events: FakeEventRepository,
    affiliations: FakeAffiliationRepository,
}

impl Fixture {
    fn new() -> Self {
        Self {
            roles: FakeRoleRepository::default(),
            events: FakeEventRepository::default(),
            affiliations: FakeAffiliationRepository::default(),
        }
    }

    fn with_event(mut self, event: Event) -> Self {
        self.events.events.insert(event.id(), event);
        self
    }

    fn with_platform_role(mut self, user_id: UserId, role: PlatformRole) -> Self {
        self.roles.roles.entry(user_id).or_default().push(role);
        self
    }

    fn with_creator(mut self, entity: EntityRef, user_id: UserId) -> Self {
        self.affiliations.creators.insert(entity, user_id);
        self
    }

    fn with_team_member(
        mut self,
        entity: EntityRef,
        user_id: UserId,
        record: CapabilityRecord,
    ) -> Self {
        self.affiliations.teams.insert((entity, user_id), record);
        self
    }

    fn service(self) -> EventAccessService {
        EventAccessService::new(
            Arc::new(self.roles),
            Arc::new(self.events),
            Arc::new(self.affiliations),
        )
    }
}

fn sample_event(
    id: EventId,
    owner_user_id: Option<UserId>,
    organizer_id: Option<OrganizerId>,
    venue_id: Option<VenueId>,
) -> Event {
    Event::new(id, "Warehouse Night", owner_user_id, organizer_id, venue_id, None)
        .unwrap_or_else(|_| panic!("test event must be valid"))
}

fn closeout_only_venue_record() -> CapabilityRecord {
    CapabilityRecord::Venue(VenueCapabilities {
        closeout_events: true,
        ..VenueCapabilities::default()
    })
}

fn full_admin_venue_record() -> CapabilityRecord {
    CapabilityRecord::Venue(VenueCapabilities {
        full_admin: true,
        ..VenueCapabilities::default()
    })
}

fn full_admin_organizer_record() -> CapabilityRecord {
    CapabilityRecord::Organizer(OrganizerCapabilities {
        full_admin: true,
        ..OrganizerCapabilities::default()
    })
}

#[tokio::test]
async fn owner_passes_every_check_without_any_affiliation() {
    let owner = UserId::new();
    let event_id = EventId::new();
    let event = sample_event(
        event_id,
        Some(owner),
        Some(OrganizerId::new()),
        Some(VenueId::new()),
    );
    let service = Fixture::new().with_event(event).service();

    let access = service.resolve_event_access(owner, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::Owner);
    assert!(access.is_owner);
    assert!(access.is_owning_entity);
    for flag in CapabilityFlag::all() {
        assert!(access.allows(*flag));
    }
}

#[tokio::test]
async fn platform_admin_passes_on_fully_null_legacy_event() {
    let admin = UserId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, None, None);
    let service = Fixture::new()
        .with_event(event)
        .with_platform_role(admin, PlatformRole::Admin)
        .service();

    let access = service.resolve_event_access(admin, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::PlatformAdmin);
    assert!(access.is_platform_admin);
    assert!(access.is_owning_entity);
    for flag in CapabilityFlag::all() {
        assert!(access.allows(*flag));
    }
}

#[tokio::test]
async fn explicit_owner_takes_precedence_over_entity_membership() {
    let owner = UserId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, Some(owner), None, Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(EntityRef::Venue(venue_id), owner, closeout_only_venue_record())
        .service();

    let access = service.resolve_event_access(owner, event_id).await;
    assert_eq!(access.ok().map(|value| value.source), Some(AccessSource::Owner));
}

#[tokio::test]
async fn organizer_creator_passes_even_when_venue_owns_the_event() {
    let organizer_creator = UserId::new();
    let venue_staff_owner = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    // The explicit owner is affiliated with the venue, so the venue is the
    // owning entity for this event.
    let event = sample_event(
        event_id,
        Some(venue_staff_owner),
        Some(organizer_id),
        Some(venue_id),
    );
    let service = Fixture::new()
        .with_event(event)
        .with_creator(EntityRef::Organizer(organizer_id), organizer_creator)
        .with_team_member(
            EntityRef::Venue(venue_id),
            venue_staff_owner,
            closeout_only_venue_record(),
        )
        .service();

    let access = service
        .resolve_event_access(organizer_creator, event_id)
        .await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::OrganizerCreator);
    assert!(!access.is_owning_entity);
    for flag in CapabilityFlag::all() {
        assert!(access.allows(*flag));
    }
}

#[tokio::test]
async fn organizer_team_record_applies_on_owning_organizer_event() {
    let member = UserId::new();
    let organizer_id = OrganizerId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, Some(organizer_id), None);
    let record = CapabilityRecord::Organizer(OrganizerCapabilities {
        edit_events: true,
        ..OrganizerCapabilities::default()
    });
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(EntityRef::Organizer(organizer_id), member, record)
        .service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::OrganizerTeam);
    assert!(access.is_owning_entity);
    assert!(access.allows(CapabilityFlag::EditEvents));
    assert!(!access.allows(CapabilityFlag::CloseoutEvents));
    assert!(!access.allows(CapabilityFlag::ViewFinancials));
}

#[tokio::test]
async fn organizer_team_full_admin_grants_all_flags_when_owning() {
    let member = UserId::new();
    let organizer_id = OrganizerId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, Some(organizer_id), None);
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(
            EntityRef::Organizer(organizer_id),
            member,
            full_admin_organizer_record(),
        )
        .service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert!(access.allows(CapabilityFlag::EditEvents));
    assert!(access.allows(CapabilityFlag::CloseoutEvents));
    assert!(access.allows(CapabilityFlag::ManageDoorStaff));
}

#[tokio::test]
async fn team_full_admin_never_leaks_onto_events_the_entity_does_not_own() {
    let member = UserId::new();
    let venue_staff_owner = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(
        event_id,
        Some(venue_staff_owner),
        Some(organizer_id),
        Some(venue_id),
    );
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(
            EntityRef::Organizer(organizer_id),
            member,
            full_admin_organizer_record(),
        )
        .with_team_member(
            EntityRef::Venue(venue_id),
            venue_staff_owner,
            closeout_only_venue_record(),
        )
        .service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::OrganizerTeam);
    assert!(!access.is_owning_entity);
    assert!(!access.allows(CapabilityFlag::EditEvents));
    assert!(!access.allows(CapabilityFlag::CloseoutEvents));
    assert!(!access.allows(CapabilityFlag::ViewFinancials));
}

#[tokio::test]
async fn hosting_venue_team_is_reduced_to_event_approval() {
    let member = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    // Legacy row: structural fallback classifies the organizer as owner.
    let event = sample_event(event_id, None, Some(organizer_id), Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(EntityRef::Venue(venue_id), member, full_admin_venue_record())
        .service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::VenueHost);
    assert!(!access.is_owning_entity);
    assert!(access.allows(CapabilityFlag::ApproveEvents));
    assert!(!access.allows(CapabilityFlag::EditEvents));
    assert!(!access.allows(CapabilityFlag::CloseoutEvents));
    assert!(!access.allows(CapabilityFlag::ViewFinancials));
    assert!(!access.allows(CapabilityFlag::ManageDoorStaff));
    assert!(!access.allows(CapabilityFlag::FullAdmin));
}

#[tokio::test]
async fn venue_creator_reduced_to_host_on_organizer_owned_event() {
    let venue_creator = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, Some(organizer_id), Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_creator(EntityRef::Venue(venue_id), venue_creator)
        .service();

    let access = service.resolve_event_access(venue_creator, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::VenueHost);
    assert!(access.allows(CapabilityFlag::ApproveEvents));
    assert!(!access.allows(CapabilityFlag::EditEvents));
}

#[tokio::test]
async fn venue_creator_has_full_capability_when_venue_owns_the_event() {
    let venue_creator = UserId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, None, Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_creator(EntityRef::Venue(venue_id), venue_creator)
        .service();

    let access = service.resolve_event_access(venue_creator, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::VenueCreator);
    assert!(access.is_owning_entity);
    for flag in CapabilityFlag::all() {
        assert!(access.allows(*flag));
    }
}

#[tokio::test]
async fn venue_team_record_applies_unmodified_when_venue_owns_event() {
    let member = UserId::new();
    let venue_staff_owner = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(
        event_id,
        Some(venue_staff_owner),
        Some(organizer_id),
        Some(venue_id),
    );
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(
            EntityRef::Venue(venue_id),
            venue_staff_owner,
            closeout_only_venue_record(),
        )
        .with_team_member(EntityRef::Venue(venue_id), member, closeout_only_venue_record())
        .service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::VenueTeam);
    assert!(access.is_owning_entity);
    assert!(access.allows(CapabilityFlag::CloseoutEvents));
    assert!(!access.allows(CapabilityFlag::ApproveEvents));
    assert!(!access.allows(CapabilityFlag::EditEvents));
}

#[tokio::test]
async fn owner_affiliated_with_both_entities_classifies_as_organizer_owned() {
    let dual_owner = UserId::new();
    let venue_member = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, Some(dual_owner), Some(organizer_id), Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_creator(EntityRef::Organizer(organizer_id), dual_owner)
        .with_creator(EntityRef::Venue(venue_id), dual_owner)
        .with_team_member(
            EntityRef::Venue(venue_id),
            venue_member,
            full_admin_venue_record(),
        )
        .service();

    // Organizer affiliation is checked first, so the organizer wins the tie
    // and the venue team is reduced to hosting rights.
    let access = service.resolve_event_access(venue_member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::VenueHost);
    assert!(access.allows(CapabilityFlag::ApproveEvents));
    assert!(!access.allows(CapabilityFlag::EditEvents));
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let member = UserId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, None, Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(EntityRef::Venue(venue_id), member, closeout_only_venue_record())
        .service();

    let first = service.resolve_event_access(member, event_id).await;
    let second = service.resolve_event_access(member, event_id).await;
    assert_eq!(first.ok(), second.ok());
}

#[tokio::test]
async fn role_lookup_failure_degrades_to_the_next_source() {
    let owner = UserId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, Some(owner), None, None);
    let mut fixture = Fixture::new().with_event(event);
    fixture.roles.fail = true;
    let service = fixture.service();

    let access = service.resolve_event_access(owner, event_id).await;
    assert_eq!(access.ok().map(|value| value.source), Some(AccessSource::Owner));
}

#[tokio::test]
async fn affiliation_lookup_failure_denies_rather_than_grants() {
    let member = UserId::new();
    let organizer_id = OrganizerId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, Some(organizer_id), None);
    let mut fixture = Fixture::new().with_event(event).with_team_member(
        EntityRef::Organizer(organizer_id),
        member,
        full_admin_organizer_record(),
    );
    fixture.affiliations.fail = true;
    let service = fixture.service();

    let access = service.resolve_event_access(member, event_id).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert_eq!(access.source, AccessSource::None);
    assert!(!access.has_access());
}

#[tokio::test]
async fn event_lookup_failure_is_a_hard_error() {
    let user = UserId::new();
    let mut fixture = Fixture::new();
    fixture.events.fail = true;
    let service = fixture.service();

    let access = service.resolve_event_access(user, EventId::new()).await;
    assert!(access.is_err());
}

#[tokio::test]
async fn missing_event_resolves_to_no_access() {
    let user = UserId::new();
    let service = Fixture::new().service();

    let access = service.resolve_event_access(user, EventId::new()).await;
    let Ok(access) = access else {
        panic!("resolution must succeed");
    };

    assert!(!access.has_access());
    for flag in CapabilityFlag::all() {
        assert!(!access.allows(*flag));
    }
}

#[tokio::test]
async fn unaffiliated_user_has_no_access() {
    let stranger = UserId::new();
    let organizer_id = OrganizerId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, Some(UserId::new()), Some(organizer_id), Some(venue_id));
    let service = Fixture::new().with_event(event).service();

    let allowed = service.can_edit_event(stranger, event_id).await;
    assert_eq!(allowed.ok(), Some(false));
}

#[tokio::test]
async fn facade_queries_test_their_named_flag() {
    let member = UserId::new();
    let venue_id = VenueId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, None, Some(venue_id));
    let service = Fixture::new()
        .with_event(event)
        .with_team_member(EntityRef::Venue(venue_id), member, closeout_only_venue_record())
        .service();

    assert_eq!(service.can_closeout_event(member, event_id).await.ok(), Some(true));
    assert_eq!(service.can_edit_event(member, event_id).await.ok(), Some(false));
    assert_eq!(service.can_view_financials(member, event_id).await.ok(), Some(false));
    assert_eq!(
        service.can_manage_door_staff(member, event_id).await.ok(),
        Some(false)
    );
    assert_eq!(
        service.can_manage_event_promoters(member, event_id).await.ok(),
        Some(false)
    );
}

#[tokio::test]
async fn event_ownership_is_stricter_than_any_capability_flag() {
    let organizer_creator = UserId::new();
    let admin = UserId::new();
    let organizer_id = OrganizerId::new();
    let event_id = EventId::new();
    let event = sample_event(event_id, None, Some(organizer_id), None);
    let service = Fixture::new()
        .with_event(event)
        .with_creator(EntityRef::Organizer(organizer_id), organizer_creator)
        .with_platform_role(admin, PlatformRole::Superadmin)
        .service();

    // Creators pass every capability check but do not own the record.
    assert_eq!(
        service.is_event_owner(organizer_creator, event_id).await.ok(),
        Some(false)
    );
    assert_eq!(service.is_event_owner(admin, event_id).await.ok(), Some(true));
}
