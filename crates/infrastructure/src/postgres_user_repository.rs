use async_trait::async_trait;
use sqlx::PgPool;
use stagedoor_application::UserRepository;
use stagedoor_core::{AppError, AppResult, UserId};

/// PostgreSQL-backed repository for user account records.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn ensure_user(
        &self,
        user_id: UserId,
        display_name: &str,
        email: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(display_name)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to ensure user exists: {error}")))?;

        Ok(())
    }
}
