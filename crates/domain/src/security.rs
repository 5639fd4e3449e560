use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stagedoor_core::AppError;

use crate::CapabilityRecord;

/// Platform-wide roles attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    /// Unrestricted platform operator.
    Superadmin,
    /// Platform administrator.
    Admin,
    /// Staff member of one or more organizers.
    OrganizerStaff,
    /// Staff member of one or more venues.
    VenueStaff,
    /// Promoter account.
    Promoter,
}

impl PlatformRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::OrganizerStaff => "organizer_staff",
            Self::VenueStaff => "venue_staff",
            Self::Promoter => "promoter",
        }
    }

    /// Returns whether this role grants the administrative override on every
    /// event, regardless of entity topology.
    #[must_use]
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, Self::Superadmin | Self::Admin)
    }
}

impl FromStr for PlatformRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "superadmin" => Ok(Self::Superadmin),
            "admin" => Ok(Self::Admin),
            "organizer_staff" => Ok(Self::OrganizerStaff),
            "venue_staff" => Ok(Self::VenueStaff),
            "promoter" => Ok(Self::Promoter),
            _ => Err(AppError::Validation(format!(
                "unknown platform role '{value}'"
            ))),
        }
    }
}

/// The relationship through which a user's event access exists.
///
/// Derived on every check, never persisted, so affiliation and ownership
/// changes take effect on the next resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// Explicit record owner of the event.
    Owner,
    /// Platform `superadmin` or `admin` override.
    PlatformAdmin,
    /// Creator of the event's organizer.
    OrganizerCreator,
    /// Team member of the event's organizer.
    OrganizerTeam,
    /// Creator of the event's venue, when the venue owns the event.
    VenueCreator,
    /// Team member of the event's venue, when the venue owns the event.
    VenueTeam,
    /// Venue staff on an event their venue merely hosts: reduced rights.
    VenueHost,
    /// No access.
    None,
}

impl AccessSource {
    /// Returns a stable transport value for this source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::PlatformAdmin => "platform_admin",
            Self::OrganizerCreator => "organizer_creator",
            Self::OrganizerTeam => "organizer_team",
            Self::VenueCreator => "venue_creator",
            Self::VenueTeam => "venue_team",
            Self::VenueHost => "venue_host",
            Self::None => "none",
        }
    }
}

/// Which of an event's associated entities holds administrative authority
/// over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwningEntity {
    /// The event's organizer owns it.
    Organizer,
    /// The event's venue owns it.
    Venue,
    /// Ownership could not be attributed to either entity.
    Unknown,
}

/// A user's relationship to one organizing entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityAffiliation {
    /// The user created the entity and holds full capability over it.
    Creator,
    /// The user was added to the entity's team with a stored record.
    TeamMember(CapabilityRecord),
    /// No relationship.
    Unaffiliated,
}

impl EntityAffiliation {
    /// Returns whether any relationship exists.
    #[must_use]
    pub fn is_affiliated(&self) -> bool {
        !matches!(self, Self::Unaffiliated)
    }
}
