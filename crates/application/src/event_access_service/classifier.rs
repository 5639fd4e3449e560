use stagedoor_domain::{EntityRef, Event, OwningEntity};

use super::EventAccessService;

impl EventAccessService {
    /// Determines which of the event's associated entities holds
    /// administrative authority over it.
    ///
    /// Events without an explicit owner (legacy rows) fall back to structural
    /// inference: the organizer if one is set, else the venue. For owned
    /// events the owner's affiliations decide; organizer affiliation is
    /// checked first, so an owner affiliated with both entities classifies
    /// the event as organizer-owned.
    pub(crate) async fn classify_owner(&self, event: &Event) -> OwningEntity {
        let Some(owner_user_id) = event.owner_user_id() else {
            if event.organizer_id().is_some() {
                return OwningEntity::Organizer;
            }
            if event.venue_id().is_some() {
                return OwningEntity::Venue;
            }
            return OwningEntity::Unknown;
        };

        if let Some(organizer_id) = event.organizer_id() {
            if self
                .is_affiliated(EntityRef::Organizer(organizer_id), owner_user_id)
                .await
            {
                return OwningEntity::Organizer;
            }
        }

        if let Some(venue_id) = event.venue_id() {
            if self
                .is_affiliated(EntityRef::Venue(venue_id), owner_user_id)
                .await
            {
                return OwningEntity::Venue;
            }
        }

        // The owner is a third party unaffiliated with either entity.
        OwningEntity::Unknown
    }
}
