//! DEI Quest Domain - Core domain types for the adventure client.
//!
//! This crate contains the vocabulary shared by every layer of the client:
//! typed ids, the permission model, and the entities the REST API describes.
//! It has no I/O and no knowledge of the wire format beyond serde derives.

pub mod entities;
pub mod error;
pub mod ids;
pub mod permissions;

pub use entities::{
    AcceptedQuestAction, AvailableQuestAction, CompletedQuestAction, Guild, Profile, QuestAction,
    User, UserRole,
};
pub use error::DomainError;
pub use ids::{GuildId, QuestActionId, UserId};
pub use permissions::{PermissionKind, PermissionSet};
