//! History log - the user's completed actions, grouped by guild.

use deiquest_domain::{CompletedQuestAction, Guild, GuildId, UserId};

use crate::application::error::ServiceError;
use crate::application::services::{AdventureService, GuildService};
use crate::application::sync::Collection;

pub struct HistoryLog {
    adventures: AdventureService,
    guilds_service: GuildService,
    user: UserId,
    guilds: Collection<Guild>,
    completed: Collection<CompletedQuestAction>,
}

impl HistoryLog {
    pub fn new(adventures: AdventureService, guilds_service: GuildService, user: UserId) -> Self {
        Self {
            adventures,
            guilds_service,
            user,
            guilds: Collection::new(),
            completed: Collection::new(),
        }
    }

    /// Fetch the guild list and the completed list. The calls are
    /// independent; whichever succeeds is applied.
    pub async fn load(&mut self) -> Result<(), ServiceError> {
        let (guilds, completed) = tokio::join!(
            self.guilds_service.list(),
            self.adventures.completed(self.user)
        );

        let mut first_error = None;
        match guilds {
            Ok(items) => self.guilds.reconcile(items),
            Err(e) => first_error = Some(e),
        }
        match completed {
            Ok(items) => self.completed.reconcile(items),
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

    pub fn completed(&self) -> &[CompletedQuestAction] {
        self.completed.items()
    }

    /// The page renders one table per guild.
    pub fn completed_for(&self, guild: GuildId) -> Vec<CompletedQuestAction> {
        self.completed
            .items()
            .iter()
            .filter(|action| action.guild_id == guild)
            .cloned()
            .collect()
    }

    /// Total XP earned across every completed action.
    pub fn total_xp(&self) -> u64 {
        self.completed
            .items()
            .iter()
            .map(|action| u64::from(action.xp))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::infrastructure::testing::ScriptedApi;
    use serde_json::json;
    use std::sync::Arc;

    fn completed_row(guild_id: u32, quest_id: u32, xp: u32) -> serde_json::Value {
        json!({
            "guild_id": guild_id, "quest_id": quest_id, "description": "done",
            "name": null, "adventurer_note": null, "xp": xp,
            "accepted_date": null, "completed_date": 1_700_000_000_000i64
        })
    }

    fn log_with(scripted: &Arc<ScriptedApi>) -> HistoryLog {
        let api = Api::new(scripted.clone());
        HistoryLog::new(
            AdventureService::new(api.clone()),
            GuildService::new(api),
            UserId::new(7),
        )
    }

    #[tokio::test]
    async fn groups_completed_actions_by_guild() {
        let scripted = Arc::new(ScriptedApi::new());
        scripted.stub(
            "GET",
            "/guild",
            json!([
                {"id": 1, "name": "Warrior", "leader_id": null, "leader_name": null},
                {"id": 2, "name": "Scribe", "leader_id": null, "leader_name": null}
            ]),
        );
        scripted.stub(
            "GET",
            "/user/7/completed-quest-actions",
            json!([
                completed_row(1, 10, 100),
                completed_row(2, 11, 15),
                completed_row(1, 12, 250)
            ]),
        );

        let mut log = log_with(&scripted);
        log.load().await.unwrap();

        assert_eq!(log.guilds().len(), 2);
        assert_eq!(log.completed_for(GuildId::new(1)).len(), 2);
        assert_eq!(log.completed_for(GuildId::new(2)).len(), 1);
        assert_eq!(log.total_xp(), 365);
    }

    #[tokio::test]
    async fn one_failed_fetch_still_applies_the_other() {
        let scripted = Arc::new(ScriptedApi::new());
        scripted.stub(
            "GET",
            "/guild",
            json!([{"id": 1, "name": "Warrior", "leader_id": null, "leader_name": null}]),
        );
        // No stub for completed-quest-actions: that call fails.

        let mut log = log_with(&scripted);
        assert!(log.load().await.is_err());
        assert_eq!(log.guilds().len(), 1);
        assert!(log.completed().is_empty());
    }
}
