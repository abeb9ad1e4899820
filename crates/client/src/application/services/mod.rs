//! Application services - one per resource family.
//!
//! Each service owns a typed [`Api`](crate::application::api::Api)
//! handle and translates between protocol records and domain entities.
//! Identity, where needed, comes from an injected `SessionStore` handle.

pub mod adventure_service;
pub mod auth_service;
pub mod catalog_service;
pub mod guild_service;
pub mod permission_service;
pub mod user_service;

pub use adventure_service::AdventureService;
pub use auth_service::AuthService;
pub use catalog_service::{CatalogService, GuildCatalog, ParticipantEngagement, QuestParticipation};
pub use guild_service::GuildService;
pub use permission_service::{AllowedLeader, PermissionService};
pub use user_service::UserService;

use crate::application::api::Api;
use crate::application::session::SessionStore;

/// The full service container handed to page stores and the runner.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub guilds: GuildService,
    pub catalog: CatalogService,
    pub adventures: AdventureService,
    pub permissions: PermissionService,
}

impl Services {
    pub fn new(api: Api, session: SessionStore) -> Self {
        Self {
            auth: AuthService::new(api.clone(), session),
            users: UserService::new(api.clone()),
            guilds: GuildService::new(api.clone()),
            catalog: CatalogService::new(api.clone()),
            adventures: AdventureService::new(api.clone()),
            permissions: PermissionService::new(api),
        }
    }
}
