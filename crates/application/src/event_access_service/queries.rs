use stagedoor_core::{AppResult, UserId};
use stagedoor_domain::{CapabilityFlag, EventId};

use super::EventAccessService;

impl EventAccessService {
    /// Returns whether the user holds one capability flag on the event.
    pub async fn has_permission(
        &self,
        user_id: UserId,
        event_id: EventId,
        flag: CapabilityFlag,
    ) -> AppResult<bool> {
        let access = self.resolve_event_access(user_id, event_id).await?;
        Ok(access.allows(flag))
    }

    /// Returns whether the user may edit the event.
    pub async fn can_edit_event(&self, user_id: UserId, event_id: EventId) -> AppResult<bool> {
        self.has_permission(user_id, event_id, CapabilityFlag::EditEvents)
            .await
    }

    /// Returns whether the user may close out the event.
    pub async fn can_closeout_event(&self, user_id: UserId, event_id: EventId) -> AppResult<bool> {
        self.has_permission(user_id, event_id, CapabilityFlag::CloseoutEvents)
            .await
    }

    /// Returns whether the user may manage the event's door staff.
    pub async fn can_manage_door_staff(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<bool> {
        self.has_permission(user_id, event_id, CapabilityFlag::ManageDoorStaff)
            .await
    }

    /// Returns whether the user may view the event's financials.
    pub async fn can_view_financials(&self, user_id: UserId, event_id: EventId) -> AppResult<bool> {
        self.has_permission(user_id, event_id, CapabilityFlag::ViewFinancials)
            .await
    }

    /// Returns whether the user may manage the event's promoters.
    pub async fn can_manage_event_promoters(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> AppResult<bool> {
        self.has_permission(user_id, event_id, CapabilityFlag::ManagePromoters)
            .await
    }

    /// Returns whether the user owns the event record.
    ///
    /// Ownership transfer is stricter than any capability flag: only the
    /// explicit record owner and platform admins qualify, never entity
    /// capability records.
    pub async fn is_event_owner(&self, user_id: UserId, event_id: EventId) -> AppResult<bool> {
        let access = self.resolve_event_access(user_id, event_id).await?;
        Ok(access.is_owner || access.is_platform_admin)
    }
}
