//! Typed API wrapper for application services.
//!
//! The raw port is object-safe and therefore untyped (`serde_json::Value`).
//! `Api` wraps an `Arc<dyn RawApiPort>` and adds the serde conversions so
//! services deal only in protocol types.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Arc<dyn RawApiPort> {
        &self.raw
    }

    /// Install or clear the Bearer token used by every request.
    pub fn set_auth_token(&self, token: Option<String>) {
        self.raw.set_auth_token(token);
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.raw.get_json(path).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let maybe_value = self.raw.get_optional_json(path).await?;
        match maybe_value {
            None => Ok(None),
            Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ApiError::ParseError(e.to_string())),
        }
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let value = self.raw.post_json(path, &body_value).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    pub async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        self.raw.post_no_response_json(path, &body_value).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let value = self.raw.put_json(path, &body_value).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    pub async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        self.raw.put_no_response_json(path, &body_value).await
    }

    pub async fn delete<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        self.raw.delete_json(path, &body_value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use serde_json::json;

    #[tokio::test]
    async fn get_decodes_typed_values() {
        let mut mock = MockRawApiPort::new();
        mock.expect_get_json()
            .withf(|path| path == "/guild")
            .returning(|_| Ok(json!([1, 2, 3])));

        let api = Api::new(Arc::new(mock));
        let values: Vec<u32> = api.get("/guild").await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_optional_treats_null_body_as_absent() {
        let mut mock = MockRawApiPort::new();
        mock.expect_get_optional_json()
            .returning(|_| Ok(Some(serde_json::Value::Null)));

        let api = Api::new(Arc::new(mock));
        let value: Option<u32> = api.get_optional("/guild/1/leader").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn parse_failures_surface_as_parse_errors() {
        let mut mock = MockRawApiPort::new();
        mock.expect_get_json()
            .returning(|_| Ok(json!("not a number")));

        let api = Api::new(Arc::new(mock));
        let result: Result<u32, ApiError> = api.get("/user/1").await;
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
