//! Composition root wiring and command dispatch.
//!
//! The binary is a terminal front-end over the same stores the pages
//! use; every subcommand builds the store a page would build, runs one
//! interaction, and prints the resulting state.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use deiquest_domain::{GuildId, PermissionKind, Profile, QuestActionId, UserId};

use crate::application::api::Api;
use crate::application::guard::{RouteDecision, RouteGuard};
use crate::application::navigation::navigation_view;
use crate::application::services::Services;
use crate::application::session::SessionStore;
use crate::application::stores::{AdminConsole, AdventureBoard, HistoryLog, LeaderCatalog};
use crate::infrastructure::http_client::ApiAdapter;
use crate::ports::outbound::{storage_keys, RawApiPort, StorageProvider, TimeProvider};

/// Configuration types for the client runner.
pub mod config {
    use crate::infrastructure::http_client::DEFAULT_API_URL;
    use crate::ports::outbound::{storage_keys, StorageProvider};

    #[derive(Clone, Debug)]
    pub struct RunnerConfig {
        pub base_url: String,
    }

    impl RunnerConfig {
        /// Resolution order: environment variable, then the persisted
        /// server-url key, then the default.
        pub fn resolve(storage: &dyn StorageProvider) -> Self {
            let base_url = std::env::var("DEIQUEST_API_URL")
                .ok()
                .or_else(|| storage.load(storage_keys::SERVER_URL))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string());
            Self { base_url }
        }
    }
}

use config::RunnerConfig;

pub struct RunnerDeps {
    pub storage: Arc<dyn StorageProvider>,
    pub time: Arc<dyn TimeProvider>,
    pub api: Api,
    pub session: SessionStore,
    pub services: Services,
}

impl RunnerDeps {
    pub fn build(
        storage: Arc<dyn StorageProvider>,
        time: Arc<dyn TimeProvider>,
        config: &RunnerConfig,
    ) -> anyhow::Result<Self> {
        let adapter = ApiAdapter::new(&config.base_url)
            .with_context(|| format!("configuring API client for {}", config.base_url))?;
        storage.save(storage_keys::SERVER_URL, adapter.base_url());

        let raw: Arc<dyn RawApiPort> = Arc::new(adapter);
        let api = Api::new(raw);
        let session = SessionStore::new(storage.clone());
        let services = Services::new(api.clone(), session.clone());

        Ok(Self {
            storage,
            time,
            api,
            session,
            services,
        })
    }
}

#[derive(Parser)]
#[command(name = "deiquest", about = "Choose Your DEI Adventure - terminal client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PermFlag {
    Approved,
    Rejected,
    Superuser,
    Eligible,
}

impl From<PermFlag> for PermissionKind {
    fn from(flag: PermFlag) -> Self {
        match flag {
            PermFlag::Approved => PermissionKind::Approved,
            PermFlag::Rejected => PermissionKind::Rejected,
            PermFlag::Superuser => PermissionKind::SuperUser,
            PermFlag::Eligible => PermissionKind::GuildLeaderEligible,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the session state and the sections it unlocks
    Status,
    /// Log in and persist the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the persisted session
    Logout,
    /// Create a new account (starts unapproved)
    Signup {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password reset email
    ForgotPassword { email: String },
    /// Set a new password (your own, or anyone's as super user)
    SetPassword {
        user_id: u32,
        #[arg(long)]
        password: String,
    },
    /// Show who you are: name, roles, permissions
    Whoami,
    /// Re-fetch your permissions from the server
    Refresh,
    /// Change your display name
    SetName { name: String },
    /// List guilds and their leaders
    Guilds,
    /// Show your available and accepted actions
    Board,
    /// Accept an available action by catalog id
    Accept { quest_id: u32 },
    /// Complete an accepted action by its copy id
    Complete { quest_id: u32 },
    /// Cancel an accepted action by its copy id
    Cancel { quest_id: u32 },
    /// Attach a note to an accepted action
    Note {
        quest_id: u32,
        #[arg(long)]
        text: Option<String>,
    },
    /// Show your completed actions grouped by guild
    History,
    /// Show a guild's catalog, or every guild's when no id is given
    Catalog { guild_id: Option<u32> },
    /// Publish a new catalog entry
    Publish {
        guild_id: u32,
        description: String,
        #[arg(long, default_value_t = 0)]
        xp: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        repeatable: bool,
    },
    /// Retire a catalog entry
    Retire { guild_id: u32, quest_id: u32 },
    /// Show who engaged with a catalog entry
    Participation { quest_id: u32 },
    /// Administration (super users)
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List users with their permissions
    Users,
    /// Toggle a permission flag for a user
    SetPerm {
        user_id: u32,
        flag: PermFlag,
        #[arg(long)]
        off: bool,
    },
    /// Create a guild, optionally with a leader
    CreateGuild {
        name: String,
        #[arg(long)]
        leader: Option<u32>,
    },
    /// Rename a guild
    RenameGuild { guild_id: u32, name: String },
    /// Assign (or clear, with no user) a guild's leader
    SetLeader {
        guild_id: u32,
        #[arg(long)]
        user: Option<u32>,
    },
}

/// Dispatch one command against freshly hydrated state.
pub async fn run(deps: RunnerDeps, command: Command) -> anyhow::Result<()> {
    deps.session.hydrate();
    deps.services.auth.resume();

    match command {
        Command::Status => status(&deps),
        Command::Login { email, password } => {
            let profile = deps.services.auth.login(&email, &password).await?;
            println!("logged in as user {}", profile.id);
            status(&deps)
        }
        Command::Logout => {
            deps.services.auth.logout().await;
            println!("logged out");
            Ok(())
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            deps.services.auth.sign_up(&name, &email, &password).await?;
            println!("account created; an administrator must approve it before you can play");
            Ok(())
        }
        Command::ForgotPassword { email } => {
            deps.services.auth.forgot_password(&email).await?;
            println!("password reset requested; check your email");
            Ok(())
        }
        Command::SetPassword { user_id, password } => {
            deps.services
                .auth
                .set_password(UserId::new(user_id), &password)
                .await?;
            println!("password updated for user {user_id}");
            Ok(())
        }
        Command::Whoami => {
            let profile = signed_in(&deps)?;
            let user = deps.services.users.get(profile.id).await?;
            println!("{} (user {})", user.name, user.id);
            for role in &user.roles {
                println!("  {} of guild {}", role.name, role.guild_id);
            }
            for kind in user.permissions.iter() {
                println!("  permission: {kind:?}");
            }
            Ok(())
        }
        Command::Refresh => {
            let profile = deps.services.auth.refresh_profile().await?;
            println!("permissions refreshed for user {}", profile.id);
            status(&deps)
        }
        Command::SetName { name } => {
            let profile = signed_in(&deps)?;
            deps.services.users.rename(profile.id, &name).await?;
            println!("name updated");
            Ok(())
        }
        Command::Guilds => {
            let guilds = deps.services.guilds.list().await?;
            for guild in guilds {
                match &guild.leader_name {
                    Some(leader) => println!("{:>4}  {}  (leader: {leader})", guild.id, guild.name),
                    None => println!("{:>4}  {}  (no current leader)", guild.id, guild.name),
                }
            }
            Ok(())
        }
        Command::Board => {
            let board = board(&deps)?;
            board.load().await?;
            print_board(&board);
            Ok(())
        }
        Command::Accept { quest_id } => {
            let mut board = board(&deps)?;
            board.load().await?;
            if board.accept(QuestActionId::new(quest_id)).await? {
                println!("accepted action {quest_id}");
            } else {
                println!("action {quest_id} is not available (already accepted?)");
            }
            board.spawn_reconcile();
            board.wait_reconcile().await;
            print_board(&board);
            Ok(())
        }
        Command::Complete { quest_id } => {
            let board = board(&deps)?;
            board.load().await?;
            if board.complete(QuestActionId::new(quest_id)).await? {
                println!("completed action {quest_id}");
            } else {
                println!("action {quest_id} is not in your accepted list");
            }
            Ok(())
        }
        Command::Cancel { quest_id } => {
            let board = board(&deps)?;
            board.load().await?;
            if board.cancel(QuestActionId::new(quest_id)).await? {
                println!("cancelled action {quest_id}");
            } else {
                println!("action {quest_id} is not in your accepted list");
            }
            Ok(())
        }
        Command::Note { quest_id, text } => {
            let board = board(&deps)?;
            board.load().await?;
            if board.edit_note(QuestActionId::new(quest_id), text).await? {
                println!("note saved");
            } else {
                println!("action {quest_id} is not in your accepted list");
            }
            Ok(())
        }
        Command::History => {
            let profile = signed_in(&deps)?;
            let mut log = HistoryLog::new(
                deps.services.adventures.clone(),
                deps.services.guilds.clone(),
                profile.id,
            );
            log.load().await?;
            for guild in log.guilds().to_vec() {
                let completed = log.completed_for(guild.id);
                if completed.is_empty() {
                    continue;
                }
                println!("{} Actions", guild.name);
                for action in completed {
                    println!(
                        "  {}  {} xp  {}",
                        action.description,
                        action.xp,
                        action.completed_date.format("%Y-%m-%d")
                    );
                }
            }
            println!("total: {} xp", log.total_xp());
            Ok(())
        }
        Command::Catalog { guild_id: Some(guild_id) } => {
            let mut catalog = LeaderCatalog::new(
                deps.services.catalog.clone(),
                GuildId::new(guild_id),
            );
            catalog.load().await?;
            for action in catalog.actions() {
                let repeat = if action.repeatable { " (repeatable)" } else { "" };
                println!("{:>4}  {}  {} xp{repeat}", action.id, action.description, action.xp);
            }
            Ok(())
        }
        Command::Catalog { guild_id: None } => {
            for bundle in deps.services.catalog.all().await? {
                println!("{} Actions", bundle.guild_title);
                for action in bundle.actions {
                    println!("  {:>4}  {}  {} xp", action.id, action.description, action.xp);
                }
            }
            Ok(())
        }
        Command::Publish {
            guild_id,
            description,
            xp,
            name,
            repeatable,
        } => {
            let mut catalog = LeaderCatalog::new(
                deps.services.catalog.clone(),
                GuildId::new(guild_id),
            );
            catalog.load().await?;
            catalog.begin_create()?;
            if let Some(draft) = catalog.draft_mut() {
                draft.description = description;
                draft.xp = xp;
                draft.name = name;
                draft.repeatable = repeatable;
            }
            catalog.commit().await?;
            if let Some(action) = catalog.actions().last() {
                println!("published action {}", action.id);
            }
            Ok(())
        }
        Command::Retire { guild_id, quest_id } => {
            let mut catalog = LeaderCatalog::new(
                deps.services.catalog.clone(),
                GuildId::new(guild_id),
            );
            catalog.load().await?;
            if catalog.retire(QuestActionId::new(quest_id)).await? {
                println!("retired action {quest_id}");
            } else {
                println!("action {quest_id} is not in this guild's catalog");
            }
            Ok(())
        }
        Command::Participation { quest_id } => {
            let report = deps
                .services
                .catalog
                .participation(QuestActionId::new(quest_id))
                .await?;
            for entry in report.adventurers {
                let state = match entry.completed_date {
                    Some(date) => format!("completed {}", date.format("%Y-%m-%d")),
                    None => "in progress".to_string(),
                };
                println!("{}  {}", entry.user_name, state);
            }
            Ok(())
        }
        Command::Admin(admin) => run_admin(&deps, admin).await,
    }
}

async fn run_admin(deps: &RunnerDeps, command: AdminCommand) -> anyhow::Result<()> {
    let mut console = AdminConsole::new(
        deps.services.guilds.clone(),
        deps.services.users.clone(),
        deps.services.permissions.clone(),
    );
    console.load().await?;

    match command {
        AdminCommand::Users => {
            for user in console.users() {
                let perms: Vec<String> =
                    user.permissions.iter().map(|k| format!("{k:?}")).collect();
                println!("{:>4}  {}  [{}]", user.id, user.name, perms.join(", "));
            }
            Ok(())
        }
        AdminCommand::SetPerm { user_id, flag, off } => {
            console
                .set_permission(UserId::new(user_id), flag.into(), !off)
                .await?;
            println!("updated permissions for user {user_id}");
            Ok(())
        }
        AdminCommand::CreateGuild { name, leader } => {
            let leader = leader
                .map(|id| eligible_leader(&console, UserId::new(id)))
                .transpose()?;
            let id = console.create_guild(&name, leader).await?;
            println!("created guild {id}");
            Ok(())
        }
        AdminCommand::RenameGuild { guild_id, name } => {
            console.rename_guild(GuildId::new(guild_id), &name).await?;
            println!("renamed guild {guild_id}");
            Ok(())
        }
        AdminCommand::SetLeader { guild_id, user } => {
            let leader = user
                .map(|id| eligible_leader(&console, UserId::new(id)))
                .transpose()?;
            console
                .set_guild_leader(GuildId::new(guild_id), leader)
                .await?;
            println!("updated leader for guild {guild_id}");
            Ok(())
        }
    }
}

fn eligible_leader(
    console: &AdminConsole,
    id: UserId,
) -> anyhow::Result<crate::application::services::AllowedLeader> {
    console
        .allowed_leaders()
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .with_context(|| format!("user {id} is not eligible to lead a guild"))
}

fn signed_in(deps: &RunnerDeps) -> anyhow::Result<Profile> {
    deps.session
        .profile()
        .context("not signed in - run `deiquest login` first")
}

fn board(deps: &RunnerDeps) -> anyhow::Result<AdventureBoard> {
    let profile = signed_in(deps)?;
    Ok(AdventureBoard::new(
        deps.services.adventures.clone(),
        deps.time.clone(),
        profile.id,
    ))
}

fn print_board(board: &AdventureBoard) {
    println!("available:");
    for action in board.available() {
        println!("  {:>4}  {}  {} xp", action.quest_id, action.description, action.xp);
    }
    println!("accepted:");
    for action in board.accepted() {
        println!("  {:>4}  {}  {} xp", action.quest_id, action.description, action.xp);
    }
}

fn status(deps: &RunnerDeps) -> anyhow::Result<()> {
    let guard = RouteGuard::new(deps.session.clone());
    match guard.check() {
        RouteDecision::Wait => println!("session: loading"),
        RouteDecision::RedirectToLogin => println!("session: signed out"),
        RouteDecision::Allow => {
            let profile = signed_in(deps)?;
            println!("session: signed in as user {}", profile.id);
            if let Some(session) = deps.session.session() {
                if session.expires_at_secs() <= deps.time.now_unix_secs() {
                    println!("your login session has expired; log in again");
                }
            }
            let view = navigation_view(&profile.permissions);
            if view.pending_approval {
                println!("your account is awaiting approval by an administrator");
            }
            for section in &view.sections {
                println!("  - {}", section.title());
            }
        }
    }
    Ok(())
}
