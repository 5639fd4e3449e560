//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod event_access_service;
mod event_service;

pub use access_ports::{
    AffiliationRepository, CreateEventInput, EventRepository, PlatformRoleRepository,
    UpdateEventInput, UserRepository,
};
pub use event_access_service::{EventAccess, EventAccessService};
pub use event_service::{EventDetail, EventService};
