//! User entity - An adventurer account as the directory endpoints report it

use serde::{Deserialize, Serialize};

use crate::{GuildId, PermissionSet, UserId};

/// A role a user holds within one guild (currently only "leader").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub guild_id: GuildId,
    pub name: String,
}

/// An adventurer as seen in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub roles: Vec<UserRole>,
    pub permissions: PermissionSet,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: Vec::new(),
            permissions: PermissionSet::empty(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    /// Whether this user leads the given guild.
    pub fn leads(&self, guild_id: GuildId) -> bool {
        self.roles
            .iter()
            .any(|r| r.guild_id == guild_id && r.name == "leader")
    }
}
