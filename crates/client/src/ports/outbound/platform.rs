//! Platform abstraction ports
//!
//! These traits abstract host-platform operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with in-memory implementations

/// Persistent key-value storage abstraction (the browser localStorage
/// role, file-backed on desktop).
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Time operations abstraction
pub trait TimeProvider: Send + Sync {
    /// Get current time as Unix timestamp in seconds
    fn now_unix_secs(&self) -> i64;

    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// Storage key constants
///
/// Kept in the ports layer as they define the contract for what keys
/// are used across the application.
pub mod storage_keys {
    /// The serialized [`Profile`](deiquest_domain::Profile).
    pub const PROFILE: &str = "deiquest_profile";
    /// The serialized login session (Bearer token and lifetime).
    pub const LOGIN_SESSION: &str = "deiquest_login_session";
    /// The API base URL last used, so the binary can resume without env vars.
    pub const SERVER_URL: &str = "deiquest_server_url";
}
