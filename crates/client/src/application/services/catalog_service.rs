//! Catalog service - the quest actions a guild leader manages.

use chrono::{DateTime, Utc};

use deiquest_domain::{
    entities::quest_action::datetime_from_millis, GuildId, QuestAction, QuestActionId, UserId,
};
use deiquest_protocol::{
    paths, CreateQuestActionRequest, CreatedQuestActionResponse, EditQuestActionRequest,
    GuildParticipationRecord, GuildQuestActionsBundle, ParticipationRecord, QuestActionRecord,
    RetireQuestActionRequest,
};

use crate::application::api::Api;
use crate::application::convert;
use crate::application::editor::QuestActionDraft;
use crate::application::error::ServiceError;

/// One guild's catalog as returned by the all-guilds listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildCatalog {
    pub guild_id: GuildId,
    pub guild_title: String,
    pub actions: Vec<QuestAction>,
}

/// One adventurer's engagement with a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEngagement {
    pub user_id: UserId,
    pub user_name: String,
    pub accepted_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub adventurer_note: Option<String>,
}

/// Usage report for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestParticipation {
    pub quest_id: QuestActionId,
    pub adventurers: Vec<ParticipantEngagement>,
}

fn participation(record: ParticipationRecord) -> QuestParticipation {
    QuestParticipation {
        quest_id: record.quest_id,
        adventurers: record
            .adventurers
            .into_iter()
            .map(|entry| ParticipantEngagement {
                user_id: entry.user.id,
                user_name: entry.user.name,
                accepted_date: entry.accepted_date.and_then(datetime_from_millis),
                completed_date: entry.completed_date.and_then(datetime_from_millis),
                adventurer_note: entry.adventurer_note,
            })
            .collect(),
    }
}

#[derive(Clone)]
pub struct CatalogService {
    api: Api,
}

impl CatalogService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn actions(&self, guild: GuildId) -> Result<Vec<QuestAction>, ServiceError> {
        let records: Vec<QuestActionRecord> =
            self.api.get(&paths::guild_quest_actions(guild)).await?;
        Ok(records.into_iter().map(convert::quest_action).collect())
    }

    /// Every guild together with its catalog.
    pub async fn all(&self) -> Result<Vec<GuildCatalog>, ServiceError> {
        let bundles: Vec<GuildQuestActionsBundle> =
            self.api.get(paths::ALL_GUILD_QUEST_ACTIONS).await?;
        Ok(bundles
            .into_iter()
            .map(|bundle| GuildCatalog {
                guild_id: bundle.guild_id,
                guild_title: bundle.guild_title,
                actions: bundle
                    .guild_quest_actions
                    .into_iter()
                    .map(convert::quest_action)
                    .collect(),
            })
            .collect())
    }

    /// Publish a new catalog entry; returns the server-assigned id.
    pub async fn create(
        &self,
        guild: GuildId,
        draft: &QuestActionDraft,
    ) -> Result<QuestActionId, ServiceError> {
        draft.validate()?;
        let response: CreatedQuestActionResponse = self
            .api
            .post(
                &paths::guild_quest_action(guild),
                &CreateQuestActionRequest {
                    description: draft.description.clone(),
                    name: draft.name.clone(),
                    adventurer_note: draft.adventurer_note.clone(),
                    xp: draft.xp,
                    repeatable: draft.repeatable,
                },
            )
            .await?;
        Ok(response.quest_id)
    }

    pub async fn edit(
        &self,
        guild: GuildId,
        target: QuestActionId,
        draft: &QuestActionDraft,
    ) -> Result<(), ServiceError> {
        draft.validate()?;
        self.api
            .put_no_response(
                &paths::guild_quest_action(guild),
                &EditQuestActionRequest {
                    quest_id: target,
                    description: draft.description.clone(),
                    name: draft.name.clone(),
                    adventurer_note: draft.adventurer_note.clone(),
                    xp: draft.xp,
                    repeatable: draft.repeatable,
                },
            )
            .await?;
        Ok(())
    }

    /// Unpublish an entry so adventurers can no longer accept it.
    pub async fn retire(&self, guild: GuildId, target: QuestActionId) -> Result<(), ServiceError> {
        self.api
            .delete(
                &paths::guild_quest_action(guild),
                &RetireQuestActionRequest { quest_id: target },
            )
            .await?;
        Ok(())
    }

    pub async fn participation(
        &self,
        quest: QuestActionId,
    ) -> Result<QuestParticipation, ServiceError> {
        let record: ParticipationRecord = self
            .api
            .get(&paths::quest_action_participation(quest))
            .await?;
        Ok(participation(record))
    }

    pub async fn guild_participation(
        &self,
        guild: GuildId,
    ) -> Result<Vec<QuestParticipation>, ServiceError> {
        let record: GuildParticipationRecord =
            self.api.get(&paths::guild_participation(guild)).await?;
        Ok(record.quest_actions.into_iter().map(participation).collect())
    }
}
