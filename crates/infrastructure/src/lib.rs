//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod postgres_access_repository;
mod postgres_event_repository;
mod postgres_user_repository;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use postgres_access_repository::PostgresAccessRepository;
pub use postgres_event_repository::PostgresEventRepository;
pub use postgres_user_repository::PostgresUserRepository;
