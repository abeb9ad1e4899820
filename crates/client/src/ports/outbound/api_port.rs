//! Raw API Port - Object-safe HTTP boundary
//!
//! Application services need an abstraction over the REST API that can
//! be stored behind `Arc<dyn ...>`, so the port works in `serde_json::Value`
//! terms. The typed wrapper in `application::api` sits on top of it.

use serde_json::Value;
use thiserror::Error;

/// Errors crossing the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be delivered (DNS, refused connection, ...).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The request exceeded the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// The request body could not be serialized.
    #[error("failed to serialize request: {0}")]
    SerializeError(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// GET where a 404 means "known absent" rather than an error.
    async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn post_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError>;

    /// DELETE with a JSON body; quest cancellation and catalog
    /// retirement both send one.
    async fn delete_json(&self, path: &str, body: &Value) -> Result<(), ApiError>;

    /// Install or clear the Bearer token sent with every request.
    fn set_auth_token(&self, token: Option<String>);
}
