use sqlx::PgPool;

mod affiliations;
mod roles;

/// PostgreSQL-backed repository for platform roles and entity affiliations.
#[derive(Clone)]
pub struct PostgresAccessRepository {
    pool: PgPool,
}

impl PostgresAccessRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
