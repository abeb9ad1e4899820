//! Session store - the single owner of the authenticated identity.
//!
//! Every page store, the navigation, and the route guard read identity
//! through a `SessionStore` handle passed in at construction; nothing
//! reaches for ambient globals. The store distinguishes three states:
//! storage not yet consulted (`Unknown`), known signed-out
//! (`LoggedOut`), and signed-in (`Active`). Callers must branch on all
//! three; treating `Unknown` as `LoggedOut` is exactly the redirect
//! race this type exists to prevent.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use deiquest_domain::{Profile, UserId};
use deiquest_protocol::LoginSessionRecord;

use crate::ports::outbound::{storage_keys, StorageProvider};

/// The session lifecycle as the rest of the client sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Persistent storage has not been consulted yet.
    Unknown,
    /// Storage was consulted and holds no usable profile.
    LoggedOut,
    /// A profile is present.
    Active(Profile),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SessionState::Active(profile) => Some(profile),
            _ => None,
        }
    }
}

/// The login session returned by the server.
///
/// The token becomes the Bearer header on subsequent requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: UserId,
    pub token: String,
    /// Seconds since the epoch.
    pub start_time: i64,
    /// Lifetime in seconds.
    pub time_to_live: i64,
}

// Manual Debug impl so the token never reaches the logs.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("token", &"...")
            .field("start_time", &self.start_time)
            .field("time_to_live", &self.time_to_live)
            .finish()
    }
}

impl AuthSession {
    pub fn expires_at_secs(&self) -> i64 {
        self.start_time.saturating_add(self.time_to_live)
    }
}

impl From<LoginSessionRecord> for AuthSession {
    fn from(record: LoginSessionRecord) -> Self {
        Self {
            user_id: record.id,
            token: record.token,
            start_time: record.start_time,
            time_to_live: record.time_to_live,
        }
    }
}

struct Inner {
    state: SessionState,
    session: Option<AuthSession>,
}

/// Process-wide holder of the authenticated identity.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageProvider>,
    inner: Arc<RwLock<Inner>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            inner: Arc::new(RwLock::new(Inner {
                state: SessionState::Unknown,
                session: None,
            })),
        }
    }

    /// Load the persisted profile and login session.
    ///
    /// A missing or unparseable blob yields `LoggedOut`; hydration
    /// never fails.
    pub fn hydrate(&self) -> SessionState {
        let state = match self.storage.load(storage_keys::PROFILE) {
            None => SessionState::LoggedOut,
            Some(text) => match serde_json::from_str::<Profile>(&text) {
                Ok(profile) => SessionState::Active(profile),
                Err(e) => {
                    tracing::warn!("discarding unreadable persisted profile: {e}");
                    SessionState::LoggedOut
                }
            },
        };

        let session = self
            .storage
            .load(storage_keys::LOGIN_SESSION)
            .and_then(|text| match serde_json::from_str::<AuthSession>(&text) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("discarding unreadable persisted login session: {e}");
                    None
                }
            });

        self.write(|inner| {
            inner.state = state.clone();
            inner.session = session;
        });
        state
    }

    pub fn state(&self) -> SessionState {
        self.read(|inner| inner.state.clone())
    }

    pub fn profile(&self) -> Option<Profile> {
        self.read(|inner| inner.state.profile().cloned())
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.read(|inner| inner.session.clone())
    }

    pub fn auth_token(&self) -> Option<String> {
        self.read(|inner| inner.session.as_ref().map(|s| s.token.clone()))
    }

    /// Replace the profile and persist it.
    pub fn set_profile(&self, profile: Profile) {
        match serde_json::to_string(&profile) {
            Ok(text) => self.storage.save(storage_keys::PROFILE, &text),
            Err(e) => tracing::error!("failed to serialize profile: {e}"),
        }
        self.write(|inner| inner.state = SessionState::Active(profile));
    }

    /// Record the login session and persist it.
    pub fn set_session(&self, session: AuthSession) {
        match serde_json::to_string(&session) {
            Ok(text) => self.storage.save(storage_keys::LOGIN_SESSION, &text),
            Err(e) => tracing::error!("failed to serialize login session: {e}"),
        }
        self.write(|inner| inner.session = Some(session));
    }

    /// Log out: forget the identity in memory and in storage.
    pub fn clear(&self) {
        self.storage.remove(storage_keys::PROFILE);
        self.storage.remove(storage_keys::LOGIN_SESSION);
        self.write(|inner| {
            inner.state = SessionState::LoggedOut;
            inner.session = None;
        });
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut Inner)) {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::MemoryStorage;
    use deiquest_domain::{PermissionKind, PermissionSet};

    fn store_with(storage: MemoryStorage) -> SessionStore {
        SessionStore::new(Arc::new(storage))
    }

    fn sample_profile() -> Profile {
        Profile::new(
            UserId::new(7),
            PermissionSet::new([PermissionKind::Approved]),
        )
    }

    #[test]
    fn starts_unknown_until_hydrated() {
        let store = store_with(MemoryStorage::new());
        assert_eq!(store.state(), SessionState::Unknown);
    }

    #[test]
    fn hydrating_empty_storage_is_logged_out() {
        let store = store_with(MemoryStorage::new());
        assert_eq!(store.hydrate(), SessionState::LoggedOut);
        assert_eq!(store.state(), SessionState::LoggedOut);
    }

    #[test]
    fn hydrating_corrupt_blob_is_logged_out_not_a_crash() {
        let storage = MemoryStorage::seeded(storage_keys::PROFILE, "{definitely not json");
        let store = store_with(storage);
        assert_eq!(store.hydrate(), SessionState::LoggedOut);
    }

    #[test]
    fn set_profile_persists_across_stores() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.hydrate();
        store.set_profile(sample_profile());
        assert!(store.state().is_active());

        // A fresh store over the same storage sees the profile.
        let reloaded = SessionStore::new(storage);
        assert_eq!(
            reloaded.hydrate(),
            SessionState::Active(sample_profile())
        );
    }

    #[test]
    fn clear_then_rehydrate_is_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.hydrate();
        store.set_profile(sample_profile());
        store.clear();
        assert_eq!(store.state(), SessionState::LoggedOut);

        let reloaded = SessionStore::new(storage);
        assert_eq!(reloaded.hydrate(), SessionState::LoggedOut);
    }

    #[test]
    fn session_token_round_trips_through_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.set_session(AuthSession {
            user_id: UserId::new(7),
            token: "tok".to_string(),
            start_time: 1_700_000_000,
            time_to_live: 2_592_000,
        });
        assert_eq!(store.auth_token().as_deref(), Some("tok"));

        let reloaded = SessionStore::new(storage);
        reloaded.hydrate();
        assert_eq!(reloaded.auth_token().as_deref(), Some("tok"));
        assert_eq!(
            reloaded.session().map(|s| s.expires_at_secs()),
            Some(1_702_592_000)
        );
    }

    #[test]
    fn auth_session_debug_hides_token() {
        let session = AuthSession {
            user_id: UserId::new(1),
            token: "secret".to_string(),
            start_time: 0,
            time_to_live: 0,
        };
        assert!(!format!("{session:?}").contains("secret"));
    }
}
