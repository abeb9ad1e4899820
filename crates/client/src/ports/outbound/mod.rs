//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must
//! implement, allowing application code to interact with the network
//! and the host platform without depending on concrete implementations.

pub mod api_port;
pub mod platform;

pub use api_port::{ApiError, RawApiPort};
pub use platform::{storage_keys, StorageProvider, TimeProvider};

// Re-export mock for convenience
#[cfg(any(test, feature = "testing"))]
pub use api_port::MockRawApiPort;
