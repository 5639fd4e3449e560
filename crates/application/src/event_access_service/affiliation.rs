use stagedoor_core::UserId;
use stagedoor_domain::{EntityAffiliation, EntityRef};
use tracing::warn;

use super::EventAccessService;

impl EventAccessService {
    /// Resolves the user's relationship to one organizing entity.
    ///
    /// Creator status is checked before team membership. A failed lookup
    /// degrades to `Unaffiliated` so one unreachable table cannot abort an
    /// entire resolution; it can never produce a grant.
    pub async fn entity_affiliation(
        &self,
        entity: EntityRef,
        user_id: UserId,
    ) -> EntityAffiliation {
        match self.affiliations.find_entity_creator(entity).await {
            Ok(Some(creator_user_id)) if creator_user_id == user_id => {
                return EntityAffiliation::Creator;
            }
            Ok(_) => {}
            Err(error) => {
                warn!(%entity, %user_id, %error, "entity creator lookup failed; treating as unaffiliated");
            }
        }

        match self.affiliations.find_team_capability(entity, user_id).await {
            Ok(Some(record)) => EntityAffiliation::TeamMember(record),
            Ok(None) => EntityAffiliation::Unaffiliated,
            Err(error) => {
                warn!(%entity, %user_id, %error, "team capability lookup failed; treating as unaffiliated");
                EntityAffiliation::Unaffiliated
            }
        }
    }

    pub(crate) async fn is_affiliated(&self, entity: EntityRef, user_id: UserId) -> bool {
        self.entity_affiliation(entity, user_id)
            .await
            .is_affiliated()
    }
}
