//! Permission administration service.

use deiquest_domain::{PermissionKind, UserId};
use deiquest_protocol::{paths, AllowedLeaderRecord, SetPermRequest};

use crate::application::api::Api;
use crate::application::error::ServiceError;

/// A user eligible to lead a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedLeader {
    pub id: UserId,
    pub name: String,
}

#[derive(Clone)]
pub struct PermissionService {
    api: Api,
}

impl PermissionService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Turn one permission flag on or off for a user.
    pub async fn set(
        &self,
        user: UserId,
        kind: PermissionKind,
        enabled: bool,
    ) -> Result<(), ServiceError> {
        self.api
            .put_no_response(&paths::perm_toggle(user, kind), &SetPermRequest { set: enabled })
            .await?;
        Ok(())
    }

    /// Users who may be assigned as guild leaders.
    pub async fn allowed_leaders(&self) -> Result<Vec<AllowedLeader>, ServiceError> {
        let records: Vec<AllowedLeaderRecord> = self.api.get(paths::ALLOWED_LEADERS).await?;
        Ok(records
            .into_iter()
            .map(|r| AllowedLeader {
                id: r.id,
                name: r.name,
            })
            .collect())
    }
}
