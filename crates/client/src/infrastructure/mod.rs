pub mod http_client;
pub mod platform;

pub mod testing;

pub use http_client::{ApiAdapter, DEFAULT_API_URL};
pub use platform::desktop::{DesktopStorageProvider, DesktopTimeProvider};
