//! Guild roster service.

use deiquest_domain::{Guild, GuildId, UserId};
use deiquest_protocol::{
    paths, CreateGuildRequest, GuildLeaderRecord, GuildRecord, SetGuildLeaderRequest,
    UpdateGuildRequest,
};

use crate::application::api::Api;
use crate::application::convert;
use crate::application::error::ServiceError;

#[derive(Clone)]
pub struct GuildService {
    api: Api,
}

impl GuildService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Guild>, ServiceError> {
        let records: Vec<GuildRecord> = self.api.get(paths::GUILDS).await?;
        Ok(records.into_iter().map(convert::guild).collect())
    }

    /// Create a guild; returns the server-assigned id.
    pub async fn create(
        &self,
        name: &str,
        leader_id: Option<UserId>,
    ) -> Result<GuildId, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("Guild name must not be empty."));
        }
        // The response body is the bare id.
        let id: GuildId = self
            .api
            .post(
                paths::GUILDS,
                &CreateGuildRequest {
                    name: name.to_string(),
                    leader_id,
                },
            )
            .await?;
        Ok(id)
    }

    /// Replace a guild's name and leader in one call.
    pub async fn update(
        &self,
        id: GuildId,
        name: &str,
        leader_id: Option<UserId>,
    ) -> Result<(), ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("Guild name must not be empty."));
        }
        self.api
            .put_no_response(
                &paths::guild(id),
                &UpdateGuildRequest {
                    name: name.to_string(),
                    leader_id,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn name(&self, id: GuildId) -> Result<String, ServiceError> {
        let name: String = self.api.get(&paths::guild_name(id)).await?;
        Ok(name)
    }

    pub async fn set_name(&self, id: GuildId, name: &str) -> Result<(), ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("Guild name must not be empty."));
        }
        // The body is a bare JSON string.
        self.api
            .put_no_response(&paths::guild_name(id), &name)
            .await?;
        Ok(())
    }

    pub async fn set_leader(
        &self,
        id: GuildId,
        leader_id: Option<UserId>,
    ) -> Result<(), ServiceError> {
        self.api
            .put_no_response(&paths::guild_leader(id), &SetGuildLeaderRequest { id: leader_id })
            .await?;
        Ok(())
    }

    pub async fn leader(&self, id: GuildId) -> Result<Option<UserId>, ServiceError> {
        let record: Option<GuildLeaderRecord> =
            self.api.get_optional(&paths::guild_leader(id)).await?;
        Ok(record.map(|r| r.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::ScriptedApi;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (Arc<ScriptedApi>, GuildService) {
        let scripted = Arc::new(ScriptedApi::new());
        (scripted.clone(), GuildService::new(Api::new(scripted)))
    }

    #[tokio::test]
    async fn list_handles_leaderless_guilds() {
        let (scripted, guilds) = service();
        scripted.stub(
            "GET",
            "/guild",
            json!([
                {"id": 1, "name": "Warrior", "leader_id": 7, "leader_name": "Ada"},
                {"id": 2, "name": "Scribe", "leader_id": null, "leader_name": null}
            ]),
        );
        let list = guilds.list().await.unwrap();
        assert!(list[0].has_leader());
        assert!(!list[1].has_leader());
    }

    #[tokio::test]
    async fn create_returns_server_assigned_id() {
        let (scripted, guilds) = service();
        scripted.stub("POST", "/guild", json!(9));
        let id = guilds.create("Artisan", None).await.unwrap();
        assert_eq!(id, GuildId::new(9));
        let call = &scripted.calls()[0];
        assert_eq!(call.body, Some(json!({"name": "Artisan", "leader_id": null})));
    }

    #[tokio::test]
    async fn update_and_set_name_send_the_right_bodies() {
        let (scripted, guilds) = service();
        scripted.stub("PUT", "/guild/1", json!(null));
        scripted.stub("PUT", "/guild/1/name", json!(null));

        guilds
            .update(GuildId::new(1), "Warriors", Some(UserId::new(7)))
            .await
            .unwrap();
        guilds.set_name(GuildId::new(1), "Fighters").await.unwrap();

        scripted.stub("GET", "/guild/1/name", json!("Fighters"));
        assert_eq!(guilds.name(GuildId::new(1)).await.unwrap(), "Fighters");

        let calls = scripted.calls();
        assert_eq!(calls[0].body, Some(json!({"name": "Warriors", "leader_id": 7})));
        // set_name sends a bare JSON string.
        assert_eq!(calls[1].body, Some(json!("Fighters")));

        // A blank name is refused locally, with no extra call recorded.
        assert!(guilds.set_name(GuildId::new(1), " ").await.is_err());
        assert_eq!(scripted.calls().len(), 3);
    }

    #[tokio::test]
    async fn leader_lookup_treats_null_as_none() {
        let (scripted, guilds) = service();
        scripted.stub("GET", "/guild/2/leader", json!(null));
        assert_eq!(guilds.leader(GuildId::new(2)).await.unwrap(), None);

        scripted.stub("GET", "/guild/1/leader", json!({"id": 7}));
        assert_eq!(
            guilds.leader(GuildId::new(1)).await.unwrap(),
            Some(UserId::new(7))
        );
    }
}
