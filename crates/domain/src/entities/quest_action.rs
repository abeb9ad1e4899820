//! Quest action entities and their per-user lifecycle views.
//!
//! A quest action is a definable task with an XP reward. For a given
//! user it is in exactly one of three views at any instant:
//! available, accepted, or completed. Accepting moves it from the
//! available view to the accepted view; completing moves it to the
//! completed view; cancelling returns it to available. A retired
//! action disappears from the available view entirely.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{GuildId, QuestActionId};

/// Convert a wire millisecond timestamp into a UTC datetime.
///
/// Out-of-range values (the wire allows the full JS safe-integer span)
/// are treated as absent rather than panicking.
pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// A catalog entry as a guild leader manages it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestAction {
    pub id: QuestActionId,
    /// The primary text shown to adventurers; markdown.
    pub description: String,
    /// Optional secondary label.
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    pub repeatable: bool,
}

impl QuestAction {
    pub fn new(id: QuestActionId, description: impl Into<String>, xp: u32) -> Self {
        Self {
            id,
            description: description.into(),
            name: None,
            adventurer_note: None,
            xp,
            repeatable: false,
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

/// An action the user may accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableQuestAction {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    pub repeatable: bool,
}

/// An action the user has accepted but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedQuestAction {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    pub open_date: Option<DateTime<Utc>>,
}

/// An action the user has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedQuestAction {
    pub guild_id: GuildId,
    pub quest_id: QuestActionId,
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    pub accepted_date: Option<DateTime<Utc>>,
    pub completed_date: DateTime<Utc>,
}

impl AvailableQuestAction {
    /// The accepted-view row produced when this action is accepted.
    ///
    /// The server assigns the accepted copy its own id; `accepted_id`
    /// is that id, not the catalog id.
    pub fn into_accepted(
        self,
        accepted_id: QuestActionId,
        open_date: Option<DateTime<Utc>>,
    ) -> AcceptedQuestAction {
        AcceptedQuestAction {
            guild_id: self.guild_id,
            quest_id: accepted_id,
            description: self.description,
            name: self.name,
            adventurer_note: self.adventurer_note,
            xp: self.xp,
            open_date,
        }
    }
}
