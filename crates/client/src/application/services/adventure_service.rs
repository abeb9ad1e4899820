//! Adventure service - one user's quest-action lifecycle.

use deiquest_domain::{
    AcceptedQuestAction, AvailableQuestAction, CompletedQuestAction, QuestActionId, UserId,
};
use deiquest_protocol::{
    paths, AcceptQuestRequest, AcceptedQuestActionRecord, AcceptedQuestResponse,
    AvailableQuestActionRecord, CancelQuestRequest, CompleteQuestRequest,
    CompletedQuestActionRecord, EditQuestTaskRequest,
};

use crate::application::api::Api;
use crate::application::convert;
use crate::application::error::ServiceError;

#[derive(Clone)]
pub struct AdventureService {
    api: Api,
}

impl AdventureService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn available(&self, user: UserId) -> Result<Vec<AvailableQuestAction>, ServiceError> {
        let records: Vec<AvailableQuestActionRecord> = self
            .api
            .get(&paths::user_available_quest_actions(user))
            .await?;
        Ok(records.into_iter().map(convert::available).collect())
    }

    pub async fn accepted(&self, user: UserId) -> Result<Vec<AcceptedQuestAction>, ServiceError> {
        let records: Vec<AcceptedQuestActionRecord> = self
            .api
            .get(&paths::user_accepted_quest_actions(user))
            .await?;
        Ok(records.into_iter().map(convert::accepted).collect())
    }

    pub async fn completed(&self, user: UserId) -> Result<Vec<CompletedQuestAction>, ServiceError> {
        let records: Vec<CompletedQuestActionRecord> = self
            .api
            .get(&paths::user_completed_quest_actions(user))
            .await?;
        Ok(records.into_iter().filter_map(convert::completed).collect())
    }

    /// Accept a catalog action; returns the id of the user's accepted copy.
    pub async fn accept(
        &self,
        user: UserId,
        quest: QuestActionId,
    ) -> Result<QuestActionId, ServiceError> {
        let response: AcceptedQuestResponse = self
            .api
            .put(
                &paths::user_accept_quest(user),
                &AcceptQuestRequest { quest_id: quest },
            )
            .await?;
        Ok(response.quest_id)
    }

    pub async fn complete(&self, user: UserId, quest: QuestActionId) -> Result<(), ServiceError> {
        self.api
            .put_no_response(
                &paths::user_complete_quest(user),
                &CompleteQuestRequest { quest_id: quest },
            )
            .await?;
        Ok(())
    }

    pub async fn cancel(&self, user: UserId, quest: QuestActionId) -> Result<(), ServiceError> {
        self.api
            .delete(
                &paths::user_cancel_quest(user),
                &CancelQuestRequest { quest_id: quest },
            )
            .await?;
        Ok(())
    }

    /// Attach (or clear) the adventurer's note on an accepted action.
    pub async fn edit_note(
        &self,
        user: UserId,
        quest: QuestActionId,
        note: Option<String>,
    ) -> Result<(), ServiceError> {
        self.api
            .put_no_response(
                &paths::user_edit_quest_task(user),
                &EditQuestTaskRequest {
                    quest_id: quest,
                    adventurer_note: note,
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
    async fn accept_returns_the_copy_id() {
        let scripted = Arc::new(ScriptedApi::new());
        scripted.stub("PUT", "/user/7/accept-quest", json!({"quest_id": 31}));
        let service = AdventureService::new(Api::new(scripted.clone()));

        let copy = service
            .accept(UserId::new(7), QuestActionId::new(3))
            .await
            .unwrap();
        assert_eq!(copy, QuestActionId::new(31));
        assert_eq!(scripted.calls()[0].body, Some(json!({"quest_id": 3})));
    }

    #[tokio::test]
    async fn completed_skips_rows_with_unreadable_dates() {
        let scripted = Arc::new(ScriptedApi::new());
        scripted.stub(
            "GET",
            "/user/7/completed-quest-actions",
            json!([
                {"guild_id": 1, "quest_id": 2, "description": "ok", "name": null,
                 "adventurer_note": null, "xp": 10,
                 "accepted_date": null, "completed_date": 1_700_000_000_000i64},
                {"guild_id": 1, "quest_id": 3, "description": "bad", "name": null,
                 "adventurer_note": null, "xp": 10,
                 "accepted_date": null, "completed_date": i64::MAX}
            ]),
        );
        let service = AdventureService::new(Api::new(scripted));
        let completed = service.completed(UserId::new(7)).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].quest_id, QuestActionId::new(2));
    }
}
