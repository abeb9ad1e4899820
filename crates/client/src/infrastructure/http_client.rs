//! HTTP adapter for the adventure REST API.
//!
//! One shared `reqwest::Client` with a bounded request timeout backs
//! every call. Requests that provably never reached the server (connect
//! failures) are retried once; anything that may have been delivered is
//! surfaced as-is so mutations are never silently duplicated.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::ports::outbound::{ApiError, RawApiPort};

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request deadline.
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct ApiAdapter {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiAdapter {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT_SECS)
    }

    /// Create an adapter with a custom timeout (for testing).
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        // Validate up front so a typo'd URL fails at startup, not on
        // the first request.
        Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Create an adapter from the `DEIQUEST_API_URL` environment
    /// variable, falling back to the default if not set.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var("DEIQUEST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await
    }

    /// Send a request, retrying once when the connection could not be
    /// established. A connect failure means the request was never
    /// delivered, so the retry cannot duplicate a mutation.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ApiError> {
        match self.send_once(method.clone(), path, body).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_connect() => {
                tracing::debug!(%path, "connect failure, retrying once: {e}");
                self.send_once(method, path, body)
                    .await
                    .map_err(map_transport_error)
            }
            Err(e) => Err(map_transport_error(e)),
        }
    }

    async fn expect_success(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.send(method, path, body).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn json_body(response: reqwest::Response) -> Result<Value, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::RequestFailed(e.to_string())
    }
}

#[async_trait::async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.expect_success(Method::GET, path, None).await?;
        Self::json_body(response).await
    }

    async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(Some(Self::json_body(response).await?))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.expect_success(Method::POST, path, Some(body)).await?;
        Self::json_body(response).await
    }

    async fn post_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.expect_success(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.expect_success(Method::PUT, path, Some(body)).await?;
        Self::json_body(response).await
    }

    async fn put_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.expect_success(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn delete_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.expect_success(Method::DELETE, path, Some(body)).await?;
        Ok(())
    }

    fn set_auth_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiAdapter::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trims_trailing_slash() {
        let adapter = ApiAdapter::new("http://localhost:3000/").unwrap();
        assert_eq!(adapter.base_url(), "http://localhost:3000");
    }

    #[test]
    fn token_roundtrip() {
        let adapter = ApiAdapter::new("http://localhost:3000").unwrap();
        assert_eq!(adapter.bearer(), None);
        adapter.set_auth_token(Some("abc".to_string()));
        assert_eq!(adapter.bearer(), Some("abc".to_string()));
        adapter.set_auth_token(None);
        assert_eq!(adapter.bearer(), None);
    }
}
