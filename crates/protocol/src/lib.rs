//! DEI Quest Protocol - Wire types for the adventure REST API.
//!
//! This crate contains every request and response body the client
//! exchanges with the server, plus the path builders for the endpoints
//! themselves.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Wire fidelity** - Field names and quirks match the server
//!    exactly (the primary quest-action text travels as `description`,
//!    permissions as `{"type": "..."}` objects, timestamps as
//!    millisecond integers)
//! 4. **Vocabulary from domain** - typed ids and permission kinds are
//!    reused; domain conversions live in the client crate

pub mod paths;
pub mod records;
pub mod requests;

pub use records::{
    AcceptedQuestActionRecord, AcceptedQuestResponse, AllowedLeaderRecord,
    AvailableQuestActionRecord, CompletedQuestActionRecord, CreatedQuestActionResponse,
    GuildLeaderRecord, GuildParticipationRecord, GuildQuestActionsBundle, GuildRecord,
    LoginSessionRecord, ParticipationEntryRecord, ParticipationRecord, ParticipantRecord,
    PermissionRecord, QuestActionRecord, RoleRecord, UserSummaryRecord,
};
pub use requests::{
    AcceptQuestRequest, CancelQuestRequest, CompleteQuestRequest, CreateAccountRequest,
    CreateGuildRequest, CreateQuestActionRequest, EditQuestActionRequest, EditQuestTaskRequest,
    ForgotPasswordRequest, LoginRequest, RetireQuestActionRequest, SetGuildLeaderRequest,
    SetNameRequest, SetPasswordRequest, SetPermRequest, UpdateGuildRequest,
};
