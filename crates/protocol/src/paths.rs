//! Endpoint path builders.
//!
//! Centralizing these keeps the services free of format strings and
//! makes the full endpoint surface greppable in one place.

use deiquest_domain::{GuildId, PermissionKind, QuestActionId, UserId};

pub const GUILDS: &str = "/guild";
pub const ALL_GUILD_QUEST_ACTIONS: &str = "/guild/quest-actions";
pub const USERS: &str = "/user";
pub const ALLOWED_LEADERS: &str = "/perm/allowed-leaders";
pub const LOGIN: &str = "/auth/login";
pub const CREATE_ACCOUNT: &str = "/auth/account";
pub const FORGOT_PASSWORD: &str = "/auth/account/forgot-password";
pub const LOGOUT: &str = "/auth/logout";

pub fn guild(id: GuildId) -> String {
    format!("/guild/{id}")
}

pub fn guild_name(id: GuildId) -> String {
    format!("/guild/{id}/name")
}

pub fn guild_leader(id: GuildId) -> String {
    format!("/guild/{id}/leader")
}

pub fn guild_quest_actions(id: GuildId) -> String {
    format!("/guild/{id}/quest-actions")
}

/// Create (POST), edit (PUT), and retire (DELETE) share this path.
pub fn guild_quest_action(id: GuildId) -> String {
    format!("/guild/{id}/quest-action")
}

pub fn guild_participation(id: GuildId) -> String {
    format!("/guild/{id}/participation")
}

pub fn quest_action_participation(id: QuestActionId) -> String {
    format!("/quest-action/{id}/participation")
}

pub fn user(id: UserId) -> String {
    format!("/user/{id}")
}

pub fn user_set_name(id: UserId) -> String {
    format!("/user/{id}/set-name")
}

pub fn user_available_quest_actions(id: UserId) -> String {
    format!("/user/{id}/available-quest-actions")
}

pub fn user_accepted_quest_actions(id: UserId) -> String {
    format!("/user/{id}/accepted-quest-actions")
}

pub fn user_completed_quest_actions(id: UserId) -> String {
    format!("/user/{id}/completed-quest-actions")
}

pub fn user_accept_quest(id: UserId) -> String {
    format!("/user/{id}/accept-quest")
}

pub fn user_complete_quest(id: UserId) -> String {
    format!("/user/{id}/complete-quest")
}

pub fn user_cancel_quest(id: UserId) -> String {
    format!("/user/{id}/cancel-quest")
}

pub fn user_edit_quest_task(id: UserId) -> String {
    format!("/user/{id}/edit-quest-task")
}

pub fn set_password(id: UserId) -> String {
    format!("/auth/account/{id}/set-password")
}

/// The path segment each permission toggle lives under.
pub fn perm_segment(kind: PermissionKind) -> &'static str {
    match kind {
        PermissionKind::Approved => "accepted",
        PermissionKind::Rejected => "rejected",
        PermissionKind::SuperUser => "superuser",
        PermissionKind::GuildLeaderEligible => "eligible-guild-leader",
    }
}

pub fn perm_toggle(user_id: UserId, kind: PermissionKind) -> String {
    format!("/perm/{user_id}/{}", perm_segment(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perm_paths_match_server_routes() {
        let id = UserId::new(12);
        assert_eq!(
            perm_toggle(id, PermissionKind::Approved),
            "/perm/12/accepted"
        );
        assert_eq!(
            perm_toggle(id, PermissionKind::GuildLeaderEligible),
            "/perm/12/eligible-guild-leader"
        );
    }

    #[test]
    fn quest_action_paths() {
        assert_eq!(guild_quest_action(GuildId::new(3)), "/guild/3/quest-action");
        assert_eq!(
            quest_action_participation(QuestActionId::new(8)),
            "/quest-action/8/participation"
        );
    }
}
