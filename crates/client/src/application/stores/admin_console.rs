//! Administration console - guild roster and permission approvals.

use deiquest_domain::{Guild, GuildId, PermissionKind, User, UserId};

use crate::application::error::ServiceError;
use crate::application::services::{AllowedLeader, GuildService, PermissionService, UserService};
use crate::application::sync::Collection;

pub struct AdminConsole {
    guilds_service: GuildService,
    users_service: UserService,
    permissions: PermissionService,
    guilds: Collection<Guild>,
    users: Collection<User>,
    leaders: Vec<AllowedLeader>,
}

impl AdminConsole {
    pub fn new(
        guilds_service: GuildService,
        users_service: UserService,
        permissions: PermissionService,
    ) -> Self {
        Self {
            guilds_service,
            users_service,
            permissions,
            guilds: Collection::new(),
            users: Collection::new(),
            leaders: Vec::new(),
        }
    }

    /// Fetch guilds, users, and the eligible-leader list. The three
    /// GETs are independent; whichever succeed are applied.
    pub async fn load(&mut self) -> Result<(), ServiceError> {
        let (guilds, users, leaders) = tokio::join!(
            self.guilds_service.list(),
            self.users_service.list(),
            self.permissions.allowed_leaders()
        );

        let mut first_error = None;
        match guilds {
            Ok(items) => self.guilds.reconcile(items),
            Err(e) => first_error = Some(e),
        }
        match users {
            Ok(items) => self.users.reconcile(items),
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match leaders {
            Ok(items) => self.leaders = items,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    pub fn guilds(&self) -> &[Guild] {
        self.guilds.items()
    }

    pub fn users(&self) -> &[User] {
        self.users.items()
    }

    pub fn allowed_leaders(&self) -> &[AllowedLeader] {
        &self.leaders
    }

    /// Create a guild and add it to the roster with its server id.
    pub async fn create_guild(
        &mut self,
        name: &str,
        leader: Option<AllowedLeader>,
    ) -> Result<GuildId, ServiceError> {
        let id = self
            .guilds_service
            .create(name, leader.as_ref().map(|l| l.id))
            .await?;
        let mut guild = Guild::new(id, name);
        guild.set_leader(leader.map(|l| (l.id, l.name)));
        self.guilds.upsert(guild);
        Ok(id)
    }

    pub async fn rename_guild(&mut self, id: GuildId, name: &str) -> Result<(), ServiceError> {
        self.guilds_service.set_name(id, name).await?;
        if let Some(mut guild) = self.guilds.get(id).cloned() {
            guild.name = name.to_string();
            self.guilds.upsert(guild);
        }
        Ok(())
    }

    /// Assign or clear a guild's leader, keeping the denormalized
    /// leader name in step locally so the page needs no refetch.
    pub async fn set_guild_leader(
        &mut self,
        id: GuildId,
        leader: Option<AllowedLeader>,
    ) -> Result<(), ServiceError> {
        self.guilds_service
            .set_leader(id, leader.as_ref().map(|l| l.id))
            .await?;
        if let Some(mut guild) = self.guilds.get(id).cloned() {
            guild.set_leader(leader.map(|l| (l.id, l.name)));
            self.guilds.upsert(guild);
        }
        Ok(())
    }

    /// Toggle one permission flag, mirroring the change locally.
    pub async fn set_permission(
        &mut self,
        user: UserId,
        kind: PermissionKind,
        enabled: bool,
    ) -> Result<(), ServiceError> {
        self.permissions.set(user, kind, enabled).await?;
        if let Some(mut record) = self.users.get(user).cloned() {
            if enabled {
                record.permissions.grant(kind);
            } else {
                record.permissions.revoke(kind);
            }
            self.users.upsert(record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::infrastructure::testing::ScriptedApi;
    use crate::ports::outbound::ApiError;
    use serde_json::json;
    use std::sync::Arc;

    fn console_with(scripted: &Arc<ScriptedApi>) -> AdminConsole {
        let api = Api::new(scripted.clone());
        AdminConsole::new(
            GuildService::new(api.clone()),
            UserService::new(api.clone()),
            PermissionService::new(api),
        )
    }

    fn stub_roster(scripted: &ScriptedApi) {
        scripted.stub(
            "GET",
            "/guild",
            json!([{"id": 1, "name": "Warrior", "leader_id": null, "leader_name": null}]),
        );
        scripted.stub(
            "GET",
            "/user",
            json!([{"id": 7, "name": "Ada", "roles": [], "permissions": []}]),
        );
        scripted.stub(
            "GET",
            "/perm/allowed-leaders",
            json!([{"id": 7, "name": "Ada"}]),
        );
    }

    #[tokio::test]
    async fn setting_a_leader_updates_the_row_without_a_refetch() {
        let scripted = Arc::new(ScriptedApi::new());
        stub_roster(&scripted);
        scripted.stub("PUT", "/guild/1/leader", json!(null));

        let mut console = console_with(&scripted);
        console.load().await.unwrap();

        let ada = console.allowed_leaders()[0].clone();
        console
            .set_guild_leader(GuildId::new(1), Some(ada))
            .await
            .unwrap();

        let guild = &console.guilds()[0];
        assert_eq!(guild.id, GuildId::new(1));
        assert_eq!(guild.name, "Warrior");
        assert_eq!(guild.leader_id, Some(UserId::new(7)));
        assert_eq!(guild.leader_name.as_deref(), Some("Ada"));
        // One initial fetch; the patch required no second round trip.
        assert_eq!(scripted.calls_to("GET /guild"), 1);
    }

    #[tokio::test]
    async fn permission_toggle_patches_the_user_row() {
        let scripted = Arc::new(ScriptedApi::new());
        stub_roster(&scripted);
        scripted.stub("PUT", "/perm/7/accepted", json!(null));

        let mut console = console_with(&scripted);
        console.load().await.unwrap();
        console
            .set_permission(UserId::new(7), PermissionKind::Approved, true)
            .await
            .unwrap();
        assert!(console.users()[0].permissions.is_approved());

        scripted.stub("PUT", "/perm/7/accepted", json!(null));
        console
            .set_permission(UserId::new(7), PermissionKind::Approved, false)
            .await
            .unwrap();
        assert!(!console.users()[0].permissions.is_approved());
    }

    #[tokio::test]
    async fn failed_toggle_leaves_the_roster_unchanged() {
        let scripted = Arc::new(ScriptedApi::new());
        stub_roster(&scripted);
        scripted.stub_error(
            "PUT",
            "/perm/7/superuser",
            ApiError::RequestFailed("boom".to_string()),
        );

        let mut console = console_with(&scripted);
        console.load().await.unwrap();
        assert!(console
            .set_permission(UserId::new(7), PermissionKind::SuperUser, true)
            .await
            .is_err());
        assert!(!console.users()[0].permissions.is_super_user());
    }

    #[tokio::test]
    async fn create_guild_appends_with_server_id_and_leader() {
        let scripted = Arc::new(ScriptedApi::new());
        stub_roster(&scripted);
        scripted.stub("POST", "/guild", json!(4));

        let mut console = console_with(&scripted);
        console.load().await.unwrap();
        let ada = console.allowed_leaders()[0].clone();
        let id = console.create_guild("Storyteller", Some(ada)).await.unwrap();

        assert_eq!(id, GuildId::new(4));
        let created = console.guilds().iter().find(|g| g.id == id).unwrap();
        assert_eq!(created.leader_name.as_deref(), Some("Ada"));
    }
}
