use stagedoor_domain::{AccessSource, CapabilityFlag};

use super::EventAccess;

impl EventAccess {
    /// Returns whether this access grants one capability flag.
    ///
    /// Rule order is significant: record ownership and the platform override
    /// pass unconditionally, organizer creators always pass, venue creators
    /// pass only on events their venue owns, hosting venues are reduced to
    /// event approval regardless of their stored record, and `full_admin` on
    /// a stored record only applies on the owning entity's events.
    #[must_use]
    pub fn allows(&self, flag: CapabilityFlag) -> bool {
        if !self.has_access() {
            return false;
        }

        if self.is_owner || self.is_platform_admin {
            return true;
        }

        if self.source == AccessSource::OrganizerCreator {
            return true;
        }

        if self.source == AccessSource::VenueCreator && self.is_owning_entity {
            return true;
        }

        if self.source == AccessSource::VenueHost {
            return flag == CapabilityFlag::ApproveEvents;
        }

        let Some(permissions) = &self.permissions else {
            return false;
        };

        if permissions.full_admin() && self.is_owning_entity {
            return true;
        }

        permissions.flag(flag)
    }
}
