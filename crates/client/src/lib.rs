//! Unified client crate.
//!
//! This crate contains the application logic of the adventure client
//! (session store, permission gating, data sync, page stores) and the
//! infrastructure adapters that back it (HTTP, persistent storage).

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;

// Re-export commonly used entrypoints
pub use application::services::Services;
pub use application::session::{SessionState, SessionStore};
