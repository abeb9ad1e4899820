//! Leader catalog - one guild's quest-action catalog plus its editor.

use deiquest_domain::{GuildId, QuestAction, QuestActionId};

use crate::application::editor::{EditorState, QuestActionDraft};
use crate::application::error::ServiceError;
use crate::application::services::{CatalogService, QuestParticipation};
use crate::application::sync::Collection;

pub struct LeaderCatalog {
    service: CatalogService,
    guild: GuildId,
    actions: Collection<QuestAction>,
    editor: EditorState,
}

impl LeaderCatalog {
    pub fn new(service: CatalogService, guild: GuildId) -> Self {
        Self {
            service,
            guild,
            actions: Collection::new(),
            editor: EditorState::default(),
        }
    }

    pub fn guild(&self) -> GuildId {
        self.guild
    }

    pub fn actions(&self) -> &[QuestAction] {
        self.actions.items()
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub async fn load(&mut self) -> Result<(), ServiceError> {
        let actions = self.service.actions(self.guild).await?;
        self.actions.reconcile(actions);
        Ok(())
    }

    /// Open the editor on an existing entry.
    pub fn begin_edit(&mut self, target: QuestActionId) -> Result<(), ServiceError> {
        let action = self
            .actions
            .get(target)
            .cloned()
            .ok_or_else(|| ServiceError::validation("no such catalog entry"))?;
        self.editor.begin_edit(&action)?;
        Ok(())
    }

    /// Open the editor on a fresh draft.
    pub fn begin_create(&mut self) -> Result<(), ServiceError> {
        self.editor.begin_create()?;
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut QuestActionDraft> {
        self.editor.draft_mut()
    }

    /// Discard local edits; the displayed catalog is untouched.
    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Commit the open editor: issue the create or update call, then
    /// patch the catalog locally. On failure the editor stays open with
    /// the draft intact so the leader can retry.
    pub async fn commit(&mut self) -> Result<bool, ServiceError> {
        match self.editor.clone() {
            EditorState::Viewing => Ok(false),
            EditorState::Editing { target, draft } => {
                self.service.edit(self.guild, target, &draft).await?;
                self.actions.upsert(action_from_draft(target, &draft));
                self.editor.cancel();
                Ok(true)
            }
            EditorState::Creating { draft } => {
                let id = self.service.create(self.guild, &draft).await?;
                self.actions.upsert(action_from_draft(id, &draft));
                self.editor.cancel();
                Ok(true)
            }
        }
    }

    /// Retire an entry so it stops being offered to adventurers.
    pub async fn retire(&mut self, target: QuestActionId) -> Result<bool, ServiceError> {
        if !self.actions.contains(target) {
            return Ok(false);
        }
        self.service.retire(self.guild, target).await?;
        self.actions.remove(target);
        Ok(true)
    }

    /// Usage report for one entry.
    pub async fn participation(
        &self,
        target: QuestActionId,
    ) -> Result<QuestParticipation, ServiceError> {
        self.service.participation(target).await
    }

    /// Usage report for the whole catalog.
    pub async fn guild_participation(&self) -> Result<Vec<QuestParticipation>, ServiceError> {
        self.service.guild_participation(self.guild).await
    }
}

fn action_from_draft(id: QuestActionId, draft: &QuestActionDraft) -> QuestAction {
    QuestAction {
        id,
        description: draft.description.clone(),
        name: draft.name.clone(),
        adventurer_note: draft.adventurer_note.clone(),
        xp: draft.xp,
        repeatable: draft.repeatable,
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

    fn catalog_row(id: u32, description: &str, xp: u32) -> serde_json::Value {
        json!({
            "id": id, "description": description, "name": null,
            "adventurer_note": null, "xp": xp, "repeatable": false
        })
    }

    async fn loaded_catalog(scripted: &Arc<ScriptedApi>) -> LeaderCatalog {
        scripted.stub(
            "GET",
            "/guild/1/quest-actions",
            json!([catalog_row(5, "Plan an event", 100), catalog_row(6, "Write a recap", 75)]),
        );
        let mut catalog =
            LeaderCatalog::new(CatalogService::new(Api::new(scripted.clone())), GuildId::new(1));
        catalog.load().await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn edit_cancel_leaves_the_catalog_identical() {
        let scripted = Arc::new(ScriptedApi::new());
        let mut catalog = loaded_catalog(&scripted).await;
        let snapshot = catalog.actions().to_vec();

        catalog.begin_edit(QuestActionId::new(5)).unwrap();
        {
            let draft = catalog.draft_mut().unwrap();
            draft.description = "Totally rewritten".to_string();
            draft.xp = 9_999;
        }
        catalog.cancel_edit();

        assert_eq!(catalog.actions(), snapshot.as_slice());
        assert!(catalog.editor().is_viewing());
    }

    #[tokio::test]
    async fn commit_edit_patches_in_place() {
        let scripted = Arc::new(ScriptedApi::new());
        let mut catalog = loaded_catalog(&scripted).await;
        scripted.stub("PUT", "/guild/1/quest-action", json!(null));

        catalog.begin_edit(QuestActionId::new(5)).unwrap();
        catalog.draft_mut().unwrap().xp = 150;
        assert!(catalog.commit().await.unwrap());

        // Patched without moving, no refetch issued.
        assert_eq!(catalog.actions()[0].xp, 150);
        assert_eq!(catalog.actions()[0].id, QuestActionId::new(5));
        assert_eq!(scripted.calls_to("GET /guild/1/quest-actions"), 1);
        assert!(catalog.editor().is_viewing());
    }

    #[tokio::test]
    async fn commit_create_appends_with_server_id() {
        let scripted = Arc::new(ScriptedApi::new());
        let mut catalog = loaded_catalog(&scripted).await;
        scripted.stub("POST", "/guild/1/quest-action", json!({"quest_id": 9}));

        catalog.begin_create().unwrap();
        {
            let draft = catalog.draft_mut().unwrap();
            draft.description = "Start a reading list".to_string();
            draft.xp = 75;
        }
        assert!(catalog.commit().await.unwrap());

        assert_eq!(catalog.actions().len(), 3);
        assert_eq!(catalog.actions()[2].id, QuestActionId::new(9));
    }

    #[tokio::test]
    async fn failed_commit_keeps_the_editor_open() {
        let scripted = Arc::new(ScriptedApi::new());
        let mut catalog = loaded_catalog(&scripted).await;
        let snapshot = catalog.actions().to_vec();
        scripted.stub_error(
            "PUT",
            "/guild/1/quest-action",
            ApiError::Timeout,
        );

        catalog.begin_edit(QuestActionId::new(5)).unwrap();
        catalog.draft_mut().unwrap().xp = 150;
        assert!(catalog.commit().await.is_err());

        // Pre-action state everywhere: collection untouched, draft kept.
        assert_eq!(catalog.actions(), snapshot.as_slice());
        assert_eq!(catalog.editor().editing_target(), Some(QuestActionId::new(5)));
    }

    #[tokio::test]
    async fn retire_removes_the_entry() {
        let scripted = Arc::new(ScriptedApi::new());
        let mut catalog = loaded_catalog(&scripted).await;
        scripted.stub("DELETE", "/guild/1/quest-action", json!(null));

        assert!(catalog.retire(QuestActionId::new(6)).await.unwrap());
        assert_eq!(catalog.actions().len(), 1);
        // Retiring an id we do not hold is a no-op with no network call.
        assert!(!catalog.retire(QuestActionId::new(6)).await.unwrap());
        assert_eq!(scripted.calls_to("DELETE /guild/1/quest-action"), 1);
    }
}
