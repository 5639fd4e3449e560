use serde::Serialize;
use stagedoor_core::UserIdentity;
use ts_rs::TS;

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/me-response.ts"
)]
pub struct MeResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl From<UserIdentity> for MeResponse {
    fn from(value: UserIdentity) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            display_name: value.display_name().to_owned(),
            email: value.email().map(ToOwned::to_owned),
        }
    }
}
