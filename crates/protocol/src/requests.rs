//! Request bodies, as the server deserializes them.

use deiquest_domain::{QuestActionId, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Manual Debug impl so credentials never reach the logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"...")
            .finish()
    }
}

/// Body of `POST /auth/account`.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"...")
            .finish()
    }
}

/// Body of `POST /auth/account/forgot-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `PUT /auth/account/{id}/set-password`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

impl std::fmt::Debug for SetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetPasswordRequest {{ ... }}")
    }
}

/// Body of `PUT /user/{id}/accept-quest`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AcceptQuestRequest {
    pub quest_id: QuestActionId,
}

/// Body of `PUT /user/{id}/complete-quest`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompleteQuestRequest {
    pub quest_id: QuestActionId,
}

/// Body of `DELETE /user/{id}/cancel-quest`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelQuestRequest {
    pub quest_id: QuestActionId,
}

/// Body of `PUT /user/{id}/edit-quest-task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditQuestTaskRequest {
    pub quest_id: QuestActionId,
    pub adventurer_note: Option<String>,
}

/// Body of `PUT /user/{id}/set-name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetNameRequest {
    pub name: String,
}

/// Body of `POST /guild`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuildRequest {
    pub name: String,
    pub leader_id: Option<UserId>,
}

/// Body of `PUT /guild/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGuildRequest {
    pub name: String,
    pub leader_id: Option<UserId>,
}

/// Body of `PUT /guild/{id}/leader`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetGuildLeaderRequest {
    pub id: Option<UserId>,
}

/// Body of `POST /guild/{id}/quest-action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestActionRequest {
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    #[serde(default)]
    pub repeatable: bool,
}

/// Body of `PUT /guild/{id}/quest-action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditQuestActionRequest {
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    #[serde(default)]
    pub repeatable: bool,
}

/// Body of `DELETE /guild/{id}/quest-action`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetireQuestActionRequest {
    pub quest_id: QuestActionId,
}

/// Body of the four `PUT /perm/{user_id}/...` toggles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetPermRequest {
    pub set: bool,
}
