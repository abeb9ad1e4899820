//! Response bodies, as the server serializes them.
//!
//! Timestamps are raw millisecond integers here; the client converts
//! them to `chrono` datetimes at the domain boundary.

use deiquest_domain::{GuildId, PermissionKind, QuestActionId, UserId};
use serde::{Deserialize, Serialize};

/// One row of the `/guild` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRecord {
    pub id: GuildId,
    pub name: String,
    pub leader_id: Option<UserId>,
    pub leader_name: Option<String>,
}

/// A guild role attached to a user summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub guild_id: GuildId,
    pub name: String,
}

/// A permission entry attached to a user summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    #[serde(rename = "type")]
    pub kind: PermissionKind,
}

/// One row of `/user` and the body of `/user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummaryRecord {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
}

/// A catalog entry of `/guild/{id}/quest-actions`.
///
/// The primary text travels in `description`; `name` is an optional
/// secondary label. This mirrors the server's column-to-field swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestActionRecord {
    pub id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    #[serde(default)]
    pub repeatable: bool,
}

/// One element of `/guild/quest-actions`: a guild with its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildQuestActionsBundle {
    pub guild_id: GuildId,
    pub guild_title: String,
    pub guild_quest_actions: Vec<QuestActionRecord>,
}

/// One row of `/user/{id}/available-quest-actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableQuestActionRecord {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    #[serde(default)]
    pub repeatable: bool,
}

/// One row of `/user/{id}/accepted-quest-actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedQuestActionRecord {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    /// Milliseconds since the epoch.
    pub open_date: Option<i64>,
}

/// One row of `/user/{id}/completed-quest-actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedQuestActionRecord {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    /// Milliseconds since the epoch.
    pub accepted_date: Option<i64>,
    /// Milliseconds since the epoch.
    pub completed_date: i64,
}

/// Response body of `PUT /user/{id}/accept-quest`.
///
/// The returned id is the server-assigned accepted copy, not the
/// catalog id that was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedQuestResponse {
    pub quest_id: QuestActionId,
}

/// Response body of `POST /guild/{id}/quest-action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedQuestActionResponse {
    pub quest_id: QuestActionId,
}

/// One row of `/perm/allowed-leaders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedLeaderRecord {
    pub id: UserId,
    pub name: String,
}

/// Body of `GET /guild/{id}/leader` (null when the guild has none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildLeaderRecord {
    pub id: UserId,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSessionRecord {
    pub id: UserId,
    pub token: String,
    /// Seconds since the epoch.
    pub start_time: i64,
    /// Session lifetime in seconds.
    pub time_to_live: i64,
}

/// A participating adventurer inside a participation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: UserId,
    pub name: String,
}

/// One adventurer's engagement with a quest action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationEntryRecord {
    pub user: ParticipantRecord,
    /// The primary text of the accepted copy.
    pub quest_description: String,
    pub quest_name: Option<String>,
    /// Milliseconds since the epoch.
    pub accepted_date: Option<i64>,
    /// Milliseconds since the epoch; absent while still open.
    pub completed_date: Option<i64>,
    pub adventurer_note: Option<String>,
}

/// Body of `GET /quest-action/{id}/participation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub quest_id: QuestActionId,
    pub adventurers: Vec<ParticipationEntryRecord>,
}

/// Body of `GET /guild/{id}/participation`: one report per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildParticipationRecord {
    pub quest_actions: Vec<ParticipationRecord>,
}
