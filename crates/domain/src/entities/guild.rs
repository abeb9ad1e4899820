//! Guild entity - A themed category of quest actions with an optional leader

use serde::{Deserialize, Serialize};

use crate::{GuildId, UserId};

/// A guild as the `/guild` listing reports it.
///
/// `leader_name` is denormalized display data; it must be kept in step
/// with `leader_id` whenever the leader changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    pub leader_id: Option<UserId>,
    pub leader_name: Option<String>,
}

impl Guild {
    pub fn new(id: GuildId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            leader_id: None,
            leader_name: None,
        }
    }

    pub fn with_leader(mut self, leader_id: UserId, leader_name: impl Into<String>) -> Self {
        self.leader_id = Some(leader_id);
        self.leader_name = Some(leader_name.into());
        self
    }

    /// Replace the leader, keeping id and display name in step.
    pub fn set_leader(&mut self, leader: Option<(UserId, String)>) {
        match leader {
            Some((id, name)) => {
                self.leader_id = Some(id);
                self.leader_name = Some(name);
            }
            None => {
                self.leader_id = None;
                self.leader_name = None;
            }
        }
    }

    pub fn has_leader(&self) -> bool {
        self.leader_id.is_some()
    }
}
