use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stagedoor_core::AppError;

use crate::EntityKind;

/// Named capability flags tested by permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityFlag {
    /// Allows editing event details.
    EditEvents,
    /// Allows approving events hosted at a venue.
    ApproveEvents,
    /// Allows deleting an organizer's events.
    DeleteEvents,
    /// Allows managing the promoter lineup for events.
    ManagePromoters,
    /// Allows viewing event financials and commission data.
    ViewFinancials,
    /// Allows closing out an event after it ends.
    CloseoutEvents,
    /// Allows managing door staff assignments.
    ManageDoorStaff,
    /// Allows viewing entity settings.
    ViewSettings,
    /// Allows publishing event photos and media.
    PublishMedia,
    /// Supersedes every other flag on the same record.
    FullAdmin,
}

impl CapabilityFlag {
    /// Returns a stable storage value for this flag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditEvents => "edit_events",
            Self::ApproveEvents => "approve_events",
            Self::DeleteEvents => "delete_events",
            Self::ManagePromoters => "manage_promoters",
            Self::ViewFinancials => "view_financials",
            Self::CloseoutEvents => "closeout_events",
            Self::ManageDoorStaff => "manage_door_staff",
            Self::ViewSettings => "view_settings",
            Self::PublishMedia => "publish_media",
            Self::FullAdmin => "full_admin",
        }
    }

    /// Returns all known capability flags.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[CapabilityFlag] = &[
            CapabilityFlag::EditEvents,
            CapabilityFlag::ApproveEvents,
            CapabilityFlag::DeleteEvents,
            CapabilityFlag::ManagePromoters,
            CapabilityFlag::ViewFinancials,
            CapabilityFlag::CloseoutEvents,
            CapabilityFlag::ManageDoorStaff,
            CapabilityFlag::ViewSettings,
            CapabilityFlag::PublishMedia,
            CapabilityFlag::FullAdmin,
        ];

        ALL
    }

    /// Parses a transport value into a capability flag.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for CapabilityFlag {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "edit_events" => Ok(Self::EditEvents),
            "approve_events" => Ok(Self::ApproveEvents),
            "delete_events" => Ok(Self::DeleteEvents),
            "manage_promoters" => Ok(Self::ManagePromoters),
            "view_financials" => Ok(Self::ViewFinancials),
            "closeout_events" => Ok(Self::CloseoutEvents),
            "manage_door_staff" => Ok(Self::ManageDoorStaff),
            "view_settings" => Ok(Self::ViewSettings),
            "publish_media" => Ok(Self::PublishMedia),
            "full_admin" => Ok(Self::FullAdmin),
            _ => Err(AppError::Validation(format!(
                "unknown capability flag '{value}'"
            ))),
        }
    }
}

/// Capability bundle attached to an organizer team membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerCapabilities {
    /// Allows editing the organizer's events.
    pub edit_events: bool,
    /// Allows deleting the organizer's events.
    pub delete_events: bool,
    /// Allows managing event promoters.
    pub manage_promoters: bool,
    /// Allows viewing event financials.
    pub view_financials: bool,
    /// Allows closing out events.
    pub closeout_events: bool,
    /// Allows managing door staff.
    pub manage_door_staff: bool,
    /// Allows viewing organizer settings.
    pub view_settings: bool,
    /// Allows publishing event media.
    pub publish_media: bool,
    /// Supersedes every other flag.
    pub full_admin: bool,
}

impl OrganizerCapabilities {
    /// Returns a record with every capability granted.
    #[must_use]
    pub fn full() -> Self {
        Self {
            edit_events: true,
            delete_events: true,
            manage_promoters: true,
            view_financials: true,
            closeout_events: true,
            manage_door_staff: true,
            view_settings: true,
            publish_media: true,
            full_admin: true,
        }
    }

    /// Returns the stored value of one flag. Flags organizer records do not
    /// define read as false.
    #[must_use]
    pub fn flag(&self, flag: CapabilityFlag) -> bool {
        match flag {
            CapabilityFlag::EditEvents => self.edit_events,
            CapabilityFlag::DeleteEvents => self.delete_events,
            CapabilityFlag::ManagePromoters => self.manage_promoters,
            CapabilityFlag::ViewFinancials => self.view_financials,
            CapabilityFlag::CloseoutEvents => self.closeout_events,
            CapabilityFlag::ManageDoorStaff => self.manage_door_staff,
            CapabilityFlag::ViewSettings => self.view_settings,
            CapabilityFlag::PublishMedia => self.publish_media,
            CapabilityFlag::FullAdmin => self.full_admin,
            CapabilityFlag::ApproveEvents => false,
        }
    }
}

/// Capability bundle attached to a venue team membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCapabilities {
    /// Allows editing events at the venue.
    pub edit_events: bool,
    /// Allows approving events hosted at the venue.
    pub approve_events: bool,
    /// Allows managing event promoters.
    pub manage_promoters: bool,
    /// Allows viewing event financials.
    pub view_financials: bool,
    /// Allows closing out events.
    pub closeout_events: bool,
    /// Allows managing door staff.
    pub manage_door_staff: bool,
    /// Allows viewing venue settings.
    pub view_settings: bool,
    /// Allows publishing event media.
    pub publish_media: bool,
    /// Supersedes every other flag.
    pub full_admin: bool,
}

impl VenueCapabilities {
    /// Returns a record with every capability granted.
    #[must_use]
    pub fn full() -> Self {
        Self {
            edit_events: true,
            approve_events: true,
            manage_promoters: true,
            view_financials: true,
            closeout_events: true,
            manage_door_staff: true,
            view_settings: true,
            publish_media: true,
            full_admin: true,
        }
    }

    /// Returns the stored value of one flag. Flags venue records do not
    /// define read as false.
    #[must_use]
    pub fn flag(&self, flag: CapabilityFlag) -> bool {
        match flag {
            CapabilityFlag::EditEvents => self.edit_events,
            CapabilityFlag::ApproveEvents => self.approve_events,
            CapabilityFlag::ManagePromoters => self.manage_promoters,
            CapabilityFlag::ViewFinancials => self.view_financials,
            CapabilityFlag::CloseoutEvents => self.closeout_events,
            CapabilityFlag::ManageDoorStaff => self.manage_door_staff,
            CapabilityFlag::ViewSettings => self.view_settings,
            CapabilityFlag::PublishMedia => self.publish_media,
            CapabilityFlag::FullAdmin => self.full_admin,
            CapabilityFlag::DeleteEvents => false,
        }
    }
}

/// Capability record a venue team receives on an event its venue merely
/// hosts: only `approve_events`, everything else (including `full_admin`)
/// forced false.
pub const HOST_VENUE_CAPABILITIES: VenueCapabilities = VenueCapabilities {
    edit_events: false,
    approve_events: true,
    manage_promoters: false,
    view_financials: false,
    closeout_events: false,
    manage_door_staff: false,
    view_settings: false,
    publish_media: false,
    full_admin: false,
};

/// Capability record of either entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapabilityRecord {
    /// Organizer-flavored record.
    Organizer(OrganizerCapabilities),
    /// Venue-flavored record.
    Venue(VenueCapabilities),
}

impl CapabilityRecord {
    /// Returns a full-capability record for the given entity kind.
    #[must_use]
    pub fn full(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Organizer => Self::Organizer(OrganizerCapabilities::full()),
            EntityKind::Venue => Self::Venue(VenueCapabilities::full()),
        }
    }

    /// Returns the reduced hosting record for a non-owning venue.
    #[must_use]
    pub fn venue_host() -> Self {
        Self::Venue(HOST_VENUE_CAPABILITIES)
    }

    /// Returns the entity kind this record belongs to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Organizer(_) => EntityKind::Organizer,
            Self::Venue(_) => EntityKind::Venue,
        }
    }

    /// Returns whether the superseding `full_admin` flag is set.
    #[must_use]
    pub fn full_admin(&self) -> bool {
        match self {
            Self::Organizer(capabilities) => capabilities.full_admin,
            Self::Venue(capabilities) => capabilities.full_admin,
        }
    }

    /// Returns the stored value of one flag without applying `full_admin`.
    #[must_use]
    pub fn flag(&self, flag: CapabilityFlag) -> bool {
        match self {
            Self::Organizer(capabilities) => capabilities.flag(flag),
            Self::Venue(capabilities) => capabilities.flag(flag),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{
        CapabilityFlag, CapabilityRecord, HOST_VENUE_CAPABILITIES, OrganizerCapabilities,
        VenueCapabilities,
    };

    #[test]
    fn capability_flag_roundtrip_storage_value() {
        for flag in CapabilityFlag::all() {
            let restored = CapabilityFlag::from_str(flag.as_str());
            assert_eq!(restored.ok(), Some(*flag));
        }
    }

    #[test]
    fn unknown_capability_flag_is_rejected() {
        assert!(CapabilityFlag::from_str("edit_everything").is_err());
    }

    #[test]
    fn host_record_grants_only_event_approval() {
        for flag in CapabilityFlag::all() {
            let expected = *flag == CapabilityFlag::ApproveEvents;
            assert_eq!(HOST_VENUE_CAPABILITIES.flag(*flag), expected);
        }
    }

    #[test]
    fn full_records_grant_every_defined_flag() {
        let organizer = CapabilityRecord::Organizer(OrganizerCapabilities::full());
        let venue = CapabilityRecord::Venue(VenueCapabilities::full());
        assert!(organizer.flag(CapabilityFlag::DeleteEvents));
        assert!(venue.flag(CapabilityFlag::ApproveEvents));
        assert!(organizer.full_admin());
        assert!(venue.full_admin());
    }

    fn arbitrary_organizer_capabilities() -> impl Strategy<Value = OrganizerCapabilities> {
        (any::<[bool; 9]>()).prop_map(|flags| OrganizerCapabilities {
            edit_events: flags[0],
            delete_events: flags[1],
            manage_promoters: flags[2],
            view_financials: flags[3],
            closeout_events: flags[4],
            manage_door_staff: flags[5],
            view_settings: flags[6],
            publish_media: flags[7],
            full_admin: flags[8],
        })
    }

    fn arbitrary_venue_capabilities() -> impl Strategy<Value = VenueCapabilities> {
        (any::<[bool; 9]>()).prop_map(|flags| VenueCapabilities {
            edit_events: flags[0],
            approve_events: flags[1],
            manage_promoters: flags[2],
            view_financials: flags[3],
            closeout_events: flags[4],
            manage_door_staff: flags[5],
            view_settings: flags[6],
            publish_media: flags[7],
            full_admin: flags[8],
        })
    }

    proptest! {
        #[test]
        fn organizer_records_never_report_venue_only_flags(
            capabilities in arbitrary_organizer_capabilities()
        ) {
            prop_assert!(!capabilities.flag(CapabilityFlag::ApproveEvents));
        }

        #[test]
        fn venue_records_never_report_organizer_only_flags(
            capabilities in arbitrary_venue_capabilities()
        ) {
            prop_assert!(!capabilities.flag(CapabilityFlag::DeleteEvents));
        }

        #[test]
        fn record_flag_reads_match_the_wrapped_bundle(
            capabilities in arbitrary_venue_capabilities()
        ) {
            let record = CapabilityRecord::Venue(capabilities);
            for flag in CapabilityFlag::all() {
                prop_assert_eq!(record.flag(*flag), capabilities.flag(*flag));
            }
        }
    }
}
