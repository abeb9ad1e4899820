//! User directory service.

use deiquest_domain::{User, UserId};
use deiquest_protocol::{paths, SetNameRequest, UserSummaryRecord};

use crate::application::api::Api;
use crate::application::convert;
use crate::application::error::ServiceError;

#[derive(Clone)]
pub struct UserService {
    api: Api,
}

impl UserService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let records: Vec<UserSummaryRecord> = self.api.get(paths::USERS).await?;
        Ok(records.into_iter().map(convert::user).collect())
    }

    pub async fn get(&self, id: UserId) -> Result<User, ServiceError> {
        let record: UserSummaryRecord = self.api.get(&paths::user(id)).await?;
        Ok(convert::user(record))
    }

    /// Self-service display-name change.
    pub async fn rename(&self, id: UserId, name: &str) -> Result<(), ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("Name must not be empty."));
        }
        self.api
            .put_no_response(
                &paths::user_set_name(id),
                &SetNameRequest {
                    name: name.to_string(),
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::ScriptedApi;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn list_converts_records() {
        let scripted = Arc::new(ScriptedApi::new());
        scripted.stub(
            "GET",
            "/user",
            json!([
                {"id": 1, "name": "Ada", "roles": [], "permissions": [{"type": "SuperUser"}]},
                {"id": 2, "name": "Grace", "roles": [], "permissions": []}
            ]),
        );
        let users = UserService::new(Api::new(scripted)).list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].permissions.is_super_user());
        assert!(users[1].permissions.is_empty());
    }

    #[tokio::test]
    async fn rename_rejects_blank_names_locally() {
        let scripted = Arc::new(ScriptedApi::new());
        let service = UserService::new(Api::new(scripted.clone()));
        assert!(service.rename(UserId::new(1), "  ").await.is_err());
        assert!(scripted.calls().is_empty());
    }
}
