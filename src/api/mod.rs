//! HTTP client for the Macros On Demand backend
//!
//! This module wraps the backend REST endpoints with bearer-token headers,
//! JSON error extraction, and a read-through response cache. Endpoint
//! wrappers live in `auth`, `preferences`, and `meals`; the cache
//! invalidation policy they apply lives in `invalidate`.

pub mod auth;
pub mod invalidate;
pub mod meals;
pub mod preferences;
pub mod token;

pub use token::TokenStore;

use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::cache::{Category, ResponseCache};

/// Base URL of the production backend
pub const DEFAULT_API_URL: &str = "http://34.82.71.163:8000/api";

/// Errors that can occur when calling the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before producing a response
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Backend returned a non-2xx status with an error message
    #[error("{message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Message taken from the body's `error` or `detail` field
        message: String,
    },

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Refresh token was rejected; the user must log in again
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// No stored tokens; the call requires a prior login
    #[error("Not logged in. Please login first.")]
    NotLoggedIn,

    /// Reading or writing the token file failed
    #[error("Token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),
}

/// Client for the Macros On Demand backend
///
/// Owns the HTTP connection pool, the persisted token pair, and the
/// response cache. Constructed once per process; all cache state flows
/// through it rather than through module-level globals.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    cache: ResponseCache,
}

impl ApiClient {
    /// Creates a client against the given base URL
    pub fn new(base_url: impl Into<String>, tokens: TokenStore, cache: ResponseCache) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
            cache,
        }
    }

    /// The response cache, for inspection and explicit invalidation
    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }

    /// The token store backing this client
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Whether a token pair is currently stored
    pub fn is_logged_in(&self) -> bool {
        self.tokens.load().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn access_token(&self) -> Result<String, ApiError> {
        self.tokens
            .load()
            .map(|tokens| tokens.access)
            .ok_or(ApiError::NotLoggedIn)
    }

    /// Sends an unauthenticated JSON request
    pub(crate) async fn anonymous_post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Sends an authenticated request, refreshing the access token once on 401
    pub(crate) async fn authorized_request(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut token = self.access_token()?;
        let mut refreshed = false;

        loop {
            let mut request = self
                .http
                .request(method.clone(), self.url(path))
                .bearer_auth(&token)
                .header(CONTENT_TYPE, "application/json");
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            if response.status() == StatusCode::UNAUTHORIZED && !refreshed {
                tracing::debug!(path, "access token rejected; refreshing");
                token = self.refresh_access_token().await?;
                refreshed = true;
                continue;
            }
            return handle_response(response).await;
        }
    }

    /// Cache-backed GET: serves from cache when fresh, fetches and caches
    /// on a miss
    ///
    /// A failed fetch never writes to the cache.
    pub(crate) async fn cached_get<T: DeserializeOwned>(
        &mut self,
        category: Category,
        key: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        if let Some(value) = self.cache.get(category, key) {
            return Ok(serde_json::from_value(value)?);
        }

        let value = self
            .authorized_request(Method::GET, path, query, None)
            .await?;
        self.cache.insert(category, key, value.clone());
        Ok(serde_json::from_value(value)?)
    }
}

/// Parses a response body, surfacing the backend's error message on non-2xx
///
/// The backend puts human-readable messages in `error` or `detail`; when
/// neither is present the generic message the original client used is kept.
async fn handle_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| body.get("detail").and_then(Value::as_str))
            .unwrap_or("Something went wrong")
            .to_string();
        tracing::debug!(status = status.as_u16(), %message, "backend error");
        return Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn offline_client() -> (ApiClient, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tokens = TokenStore::with_dir(temp_dir.path().to_path_buf());
        let client = ApiClient::new("http://localhost:8000/api", tokens, ResponseCache::new());
        (client, temp_dir)
    }

    #[test]
    fn test_trailing_slashes_are_trimmed_from_base_url() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tokens = TokenStore::with_dir(temp_dir.path().to_path_buf());
        let client = ApiClient::new("http://localhost:8000/api//", tokens, ResponseCache::new());

        assert_eq!(
            client.url("/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );
    }

    #[test]
    fn test_not_logged_in_without_stored_tokens() {
        let (client, _temp_dir) = offline_client();
        assert!(!client.is_logged_in());
        assert!(matches!(client.access_token(), Err(ApiError::NotLoggedIn)));
    }

    #[test]
    fn test_error_messages_match_the_original_client() {
        assert_eq!(
            ApiError::SessionExpired.to_string(),
            "Session expired. Please login again."
        );
        let backend = ApiError::Backend {
            status: 400,
            message: "User already exists.".to_string(),
        };
        assert_eq!(backend.to_string(), "User already exists.");
    }
}
