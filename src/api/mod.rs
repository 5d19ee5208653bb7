// src/api/mod.rs

//! HTTP access to the forum backend.
//!
//! `ApiClient` is a thin wrapper over the REST API: it joins paths
//! onto the configured base URL, sends optional JSON bodies, and maps
//! responses onto the client's error taxonomy. There are no retries;
//! every failure propagates to the caller.

mod comments;
mod posts;
mod topics;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Fallback when the backend's error body carries no message.
const GENERIC_ERROR: &str = "Something went wrong";

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a configured client from application settings.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.api.user_agent)
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Perform a request and return the parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Self::interpret(status, &text)
    }

    /// Map a response status and raw body onto the error taxonomy.
    ///
    /// Non-success bodies are expected to be a JSON object with an
    /// `error` string field; anything else falls back to a generic
    /// message. 404 is distinguished so loaders can abort navigation.
    fn interpret(status: StatusCode, body: &str) -> Result<Value> {
        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(body)
                .map_err(|e| AppError::transport(format!("invalid JSON in response: {e}")));
        }

        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| GENERIC_ERROR.to_string());

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }
        Err(AppError::request_failed(status.as_u16(), message))
    }

    /// Decode a JSON value into a typed model.
    fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
        serde_json::from_value(value)
            .map_err(|e| AppError::transport(format!("unexpected response shape: {e}")))
    }

    /// Decode a collection, treating `null` as empty. The backend
    /// sends `null` instead of `[]` for an empty table.
    fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
        if value.is_null() {
            return Ok(Vec::new());
        }
        Self::decode(value)
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }
}
