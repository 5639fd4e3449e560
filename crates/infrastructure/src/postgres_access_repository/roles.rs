use std::str::FromStr;

use async_trait::async_trait;
use sqlx::FromRow;
use stagedoor_application::PlatformRoleRepository;
use stagedoor_core::{AppError, AppResult, UserId};
use stagedoor_domain::PlatformRole;

use super::PostgresAccessRepository;

#[derive(Debug, FromRow)]
struct RoleRow {
    role: String,
}

#[async_trait]
impl PlatformRoleRepository for PostgresAccessRepository {
    async fn list_platform_roles(&self, user_id: UserId) -> AppResult<Vec<PlatformRole>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT role
            FROM platform_role_assignments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load platform roles: {error}")))?;

        rows.into_iter()
            .map(|row| {
                PlatformRole::from_str(row.role.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "failed to decode platform role '{}' for user '{user_id}': {error}",
                        row.role
                    ))
                })
            })
            .collect()
    }
}
