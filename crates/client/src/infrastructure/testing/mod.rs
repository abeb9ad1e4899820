//! In-crate test doubles shared by unit tests.
//!
//! `MemoryStorage` stands in for the platform storage; `ScriptedApi`
//! plays the server by answering routes from a script of canned JSON
//! responses while recording every call it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::ports::outbound::{ApiError, RawApiPort, StorageProvider, TimeProvider};

/// In-memory storage provider.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key (e.g. a persisted profile) before hydration.
    pub fn seeded(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.save(key, value);
        storage
    }
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.remove(key);
        }
    }
}

/// Time provider pinned to a fixed instant.
#[derive(Clone, Copy)]
pub struct FixedTime(pub i64);

impl TimeProvider for FixedTime {
    fn now_unix_secs(&self) -> i64 {
        self.0 / 1000
    }

    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// One call recorded by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// `"METHOD /path"`.
    pub route: String,
    pub body: Option<Value>,
}

/// A scripted stand-in for the REST API.
///
/// One response per route; stubbing a route again replaces it, which is
/// how tests model server state changing between refetches. Calls to
/// unscripted routes fail loudly.
#[derive(Default)]
pub struct ScriptedApi {
    routes: Mutex<HashMap<String, Result<Value, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    token: Mutex<Option<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, method: &str, path: &str, value: Value) -> &Self {
        self.set(method, path, Ok(value));
        self
    }

    pub fn stub_error(&self, method: &str, path: &str, error: ApiError) -> &Self {
        self.set(method, path, Err(error));
        self
    }

    fn set(&self, method: &str, path: &str, response: Result<Value, ApiError>) {
        if let Ok(mut guard) = self.routes.lock() {
            guard.insert(format!("{method} {path}"), response);
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn calls_to(&self, route: &str) -> usize {
        self.calls().iter().filter(|c| c.route == route).count()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|g| g.clone())
    }

    fn respond(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let route = format!("{method} {path}");
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(RecordedCall {
                route: route.clone(),
                body: body.cloned(),
            });
        }
        let routes = match self.routes.lock() {
            Ok(guard) => guard,
            Err(_) => return Err(ApiError::RequestFailed("script lock poisoned".into())),
        };
        routes.get(&route).cloned().unwrap_or_else(|| {
            Err(ApiError::RequestFailed(format!(
                "no scripted response for {route}"
            )))
        })
    }
}

#[async_trait::async_trait]
impl RawApiPort for ScriptedApi {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.respond("GET", path, None)
    }

    async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        match self.respond("GET", path, None) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.respond("POST", path, Some(body))
    }

    async fn post_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.respond("POST", path, Some(body)).map(|_| ())
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.respond("PUT", path, Some(body))
    }

    async fn put_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.respond("PUT", path, Some(body)).map(|_| ())
    }

    async fn delete_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.respond("DELETE", path, Some(body)).map(|_| ())
    }

    fn set_auth_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }
}
