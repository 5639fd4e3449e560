use std::sync::Arc;

use stagedoor_domain::{AccessSource, CapabilityRecord};

use crate::access_ports::{AffiliationRepository, EventRepository, PlatformRoleRepository};

mod affiliation;
mod classifier;
mod project;
mod queries;
mod resolve;

#[cfg(test)]
mod tests;

/// Resolved access for one user on one event.
///
/// Recomputed on every check and never persisted, so affiliation and
/// ownership changes take effect on the next resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAccess {
    /// The relationship through which access exists.
    pub source: AccessSource,
    /// The stored or synthesized capability record backing entity-level
    /// access. `None` for owner, platform-admin, and denied results, where
    /// capability is implied (or absent) rather than recorded.
    pub permissions: Option<CapabilityRecord>,
    /// Whether the user is the event's explicit record owner.
    pub is_owner: bool,
    /// Whether the user holds a platform-admin role.
    pub is_platform_admin: bool,
    /// Whether the user's entity is the owning entity for this event.
    pub is_owning_entity: bool,
}

impl EventAccess {
    pub(crate) fn denied() -> Self {
        Self {
            source: AccessSource::None,
            permissions: None,
            is_owner: false,
            is_platform_admin: false,
            is_owning_entity: false,
        }
    }

    pub(crate) fn owner() -> Self {
        Self {
            source: AccessSource::Owner,
            permissions: None,
            is_owner: true,
            is_platform_admin: false,
            is_owning_entity: true,
        }
    }

    // The administrative override bypasses entity topology entirely.
    pub(crate) fn platform_admin() -> Self {
        Self {
            source: AccessSource::PlatformAdmin,
            permissions: None,
            is_owner: false,
            is_platform_admin: true,
            is_owning_entity: true,
        }
    }

    pub(crate) fn entity(
        source: AccessSource,
        permissions: CapabilityRecord,
        is_owning_entity: bool,
    ) -> Self {
        Self {
            source,
            permissions: Some(permissions),
            is_owner: false,
            is_platform_admin: false,
            is_owning_entity,
        }
    }

    pub(crate) fn venue_host() -> Self {
        Self::entity(AccessSource::VenueHost, CapabilityRecord::venue_host(), false)
    }

    /// Returns whether any access exists at all.
    #[must_use]
    pub fn has_access(&self) -> bool {
        self.source != AccessSource::None
    }
}

/// Application service resolving event access and effective permissions.
#[derive(Clone)]
pub struct EventAccessService {
    roles: Arc<dyn PlatformRoleRepository>,
    events: Arc<dyn EventRepository>,
    affiliations: Arc<dyn AffiliationRepository>,
}

impl EventAccessService {
    /// Creates the service from repository implementations.
    #[must_use]
    pub fn new(
        roles: Arc<dyn PlatformRoleRepository>,
        events: Arc<dyn EventRepository>,
        affiliations: Arc<dyn AffiliationRepository>,
    ) -> Self {
        Self {
            roles,
            events,
            affiliations,
        }
    }
}
