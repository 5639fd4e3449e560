use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagedoor_core::{AppError, AppResult, UserId};
use uuid::Uuid;

use crate::{OrganizerId, VenueId};

/// Unique identifier for an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EventId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// An event record and its organizational associations.
///
/// An event has at most one organizer and at most one venue; either, both, or
/// (for legacy rows) neither may be set. `owner_user_id` is the explicit
/// record owner and is nullable because events predate ownership tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    owner_user_id: Option<UserId>,
    organizer_id: Option<OrganizerId>,
    venue_id: Option<VenueId>,
    starts_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Creates a validated event record.
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        owner_user_id: Option<UserId>,
        organizer_id: Option<OrganizerId>,
        venue_id: Option<VenueId>,
        starts_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "event name must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self {
            id,
            name,
            owner_user_id,
            organizer_id,
            venue_id,
            starts_at,
        })
    }

    /// Returns the event identifier.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the explicit record owner, if the event has one.
    #[must_use]
    pub fn owner_user_id(&self) -> Option<UserId> {
        self.owner_user_id
    }

    /// Returns the associated organizer, if any.
    #[must_use]
    pub fn organizer_id(&self) -> Option<OrganizerId> {
        self.organizer_id
    }

    /// Returns the associated venue, if any.
    #[must_use]
    pub fn venue_id(&self) -> Option<VenueId> {
        self.venue_id
    }

    /// Returns the scheduled start time, if one is set.
    #[must_use]
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    /// Renames the event.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "event name must not be empty or whitespace".to_owned(),
            ));
        }

        self.name = name;
        Ok(())
    }

    /// Replaces the scheduled start time.
    pub fn reschedule(&mut self, starts_at: Option<DateTime<Utc>>) {
        self.starts_at = starts_at;
    }
}
