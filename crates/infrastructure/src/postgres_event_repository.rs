use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use stagedoor_application::EventRepository;
use stagedoor_core::{AppError, AppResult, UserId};
use stagedoor_domain::{Event, EventId, OrganizerId, VenueId};
use uuid::Uuid;

/// PostgreSQL-backed repository for event records.
#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: Uuid,
    name: String,
    owner_user_id: Option<Uuid>,
    organizer_id: Option<Uuid>,
    venue_id: Option<Uuid>,
    starts_at: Option<DateTime<Utc>>,
}

impl EventRow {
    fn into_event(self) -> AppResult<Event> {
        let id = self.id;

        Event::new(
            EventId::from_uuid(self.id),
            self.name,
            self.owner_user_id.map(UserId::from_uuid),
            self.organizer_id.map(OrganizerId::from_uuid),
            self.venue_id.map(VenueId::from_uuid),
            self.starts_at,
        )
        .map_err(|error| AppError::Internal(format!("failed to decode event '{id}': {error}")))
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn find_event(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, owner_user_id, organizer_id, venue_id, starts_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load event: {error}")))?;

        row.map(EventRow::into_event).transpose()
    }

    async fn insert_event(&self, event: &Event) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, name, owner_user_id, organizer_id, venue_id, starts_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.name())
        .bind(event.owner_user_id().map(|value| value.as_uuid()))
        .bind(event.organizer_id().map(|value| value.as_uuid()))
        .bind(event.venue_id().map(|value| value.as_uuid()))
        .bind(event.starts_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert event: {error}")))?;

        Ok(())
    }

    async fn update_event(&self, event: &Event) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = $2, starts_at = $3
            WHERE id = $1
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.name())
        .bind(event.starts_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update event: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "event '{}' does not exist",
                event.id()
            )));
        }

        Ok(())
    }

    async fn list_events_for_user(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT DISTINCT events.id, events.name, events.owner_user_id,
                events.organizer_id, events.venue_id, events.starts_at
            FROM events
            LEFT JOIN organizers ON organizers.id = events.organizer_id
            LEFT JOIN venues ON venues.id = events.venue_id
            LEFT JOIN organizer_team_members AS organizer_members
                ON organizer_members.organizer_id = events.organizer_id
                AND organizer_members.user_id = $1
            LEFT JOIN venue_team_members AS venue_members
                ON venue_members.venue_id = events.venue_id
                AND venue_members.user_id = $1
            WHERE events.owner_user_id = $1
                OR organizers.creator_user_id = $1
                OR venues.creator_user_id = $1
                OR organizer_members.user_id IS NOT NULL
                OR venue_members.user_id IS NOT NULL
            ORDER BY events.starts_at NULLS LAST, events.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list events for user: {error}")))?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, owner_user_id, organizer_id, venue_id, starts_at
            FROM events
            ORDER BY starts_at NULLS LAST, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list events: {error}")))?;

        rows.into_iter().map(EventRow::into_event).collect()
    }
}
