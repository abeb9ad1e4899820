//! Page stores - the stateful side of each page, stripped of markup.
//!
//! A store owns the collections a page renders, applies optimistic
//! patches when its mutations succeed, and reconciles against the
//! server on demand. A failed call never touches local state; the
//! caller gets the error and the page keeps its pre-action contents.

pub mod admin_console;
pub mod adventure_board;
pub mod history_log;
pub mod leader_catalog;

pub use admin_console::AdminConsole;
pub use adventure_board::AdventureBoard;
pub use history_log::HistoryLog;
pub use leader_catalog::LeaderCatalog;
