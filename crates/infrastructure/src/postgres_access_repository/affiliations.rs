use async_trait::async_trait;
use sqlx::FromRow;
use stagedoor_application::AffiliationRepository;
use stagedoor_core::{AppError, AppResult, UserId};
use stagedoor_domain::{
    CapabilityRecord, EntityRef, OrganizerCapabilities, VenueCapabilities,
};
use uuid::Uuid;

use super::PostgresAccessRepository;

#[derive(Debug, FromRow)]
struct CreatorRow {
    creator_user_id: Uuid,
}

#[derive(Debug, FromRow)]
struct OrganizerMembershipRow {
    can_edit_events: bool,
    can_delete_events: bool,
    can_manage_promoters: bool,
    can_view_financials: bool,
    can_closeout_events: bool,
    can_manage_door_staff: bool,
    can_view_settings: bool,
    can_publish_media: bool,
    is_full_admin: bool,
}

impl From<OrganizerMembershipRow> for CapabilityRecord {
    fn from(row: OrganizerMembershipRow) -> Self {
        Self::Organizer(OrganizerCapabilities {
            edit_events: row.can_edit_events,
            delete_events: row.can_delete_events,
            manage_promoters: row.can_manage_promoters,
            view_financials: row.can_view_financials,
            closeout_events: row.can_closeout_events,
            manage_door_staff: row.can_manage_door_staff,
            view_settings: row.can_view_settings,
            publish_media: row.can_publish_media,
            full_admin: row.is_full_admin,
        })
    }
}

#[derive(Debug, FromRow)]
struct VenueMembershipRow {
    can_edit_events: bool,
    can_approve_events: bool,
    can_manage_promoters: bool,
    can_view_financials: bool,
    can_closeout_events: bool,
    can_manage_door_staff: bool,
    can_view_settings: bool,
    can_publish_media: bool,
    is_full_admin: bool,
}

impl From<VenueMembershipRow> for CapabilityRecord {
    fn from(row: VenueMembershipRow) -> Self {
        Self::Venue(VenueCapabilities {
            edit_events: row.can_edit_events,
            approve_events: row.can_approve_events,
            manage_promoters: row.can_manage_promoters,
            view_financials: row.can_view_financials,
            closeout_events: row.can_closeout_events,
            manage_door_staff: row.can_manage_door_staff,
            view_settings: row.can_view_settings,
            publish_media: row.can_publish_media,
            full_admin: row.is_full_admin,
        })
    }
}

#[async_trait]
impl AffiliationRepository for PostgresAccessRepository {
    async fn find_entity_creator(&self, entity: EntityRef) -> AppResult<Option<UserId>> {
        let query = match entity {
            EntityRef::Organizer(_) => {
                r#"
                SELECT creator_user_id
                FROM organizers
                WHERE id = $1
                "#
            }
            EntityRef::Venue(_) => {
                r#"
                SELECT creator_user_id
                FROM venues
                WHERE id = $1
                "#
            }
        };

        let row = sqlx::query_as::<_, CreatorRow>(query)
            .bind(entity.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to load creator for {entity}: {error}"))
            })?;

        Ok(row.map(|value| UserId::from_uuid(value.creator_user_id)))
    }

    async fn find_team_capability(
        &self,
        entity: EntityRef,
        user_id: UserId,
    ) -> AppResult<Option<CapabilityRecord>> {
        match entity {
            EntityRef::Organizer(organizer_id) => {
                let row = sqlx::query_as::<_, OrganizerMembershipRow>(
                    r#"
                    SELECT can_edit_events, can_delete_events, can_manage_promoters,
                        can_view_financials, can_closeout_events, can_manage_door_staff,
                        can_view_settings, can_publish_media, is_full_admin
                    FROM organizer_team_members
                    WHERE organizer_id = $1 AND user_id = $2
                    "#,
                )
                .bind(organizer_id.as_uuid())
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!(
                        "failed to load organizer team membership: {error}"
                    ))
                })?;

                Ok(row.map(CapabilityRecord::from))
            }
            EntityRef::Venue(venue_id) => {
                let row = sqlx::query_as::<_, VenueMembershipRow>(
                    r#"
                    SELECT can_edit_events, can_approve_events, can_manage_promoters,
                        can_view_financials, can_closeout_events, can_manage_door_staff,
                        can_view_settings, can_publish_media, is_full_admin
                    FROM venue_team_members
                    WHERE venue_id = $1 AND user_id = $2
                    "#,
                )
                .bind(venue_id.as_uuid())
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to load venue team membership: {error}"))
                })?;

                Ok(row.map(CapabilityRecord::from))
            }
        }
    }
}
