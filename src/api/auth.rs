//! Auth endpoint wrappers
//!
//! Registration and login store the returned token pair and reset the
//! cache, since everything cached belongs to the previous identity. Logout
//! is local: discard tokens, discard cache. Token refresh happens at most
//! once per request, triggered by a 401.

use serde_json::{json, Value};

use super::{invalidate, ApiClient, ApiError};
use crate::cache::{Category, DEFAULT_KEY};
use crate::data::{AuthTokens, UserDetails};

impl ApiClient {
    /// Registers a new user and starts a session
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "confirm_password": password,
        });
        let response = self.anonymous_post("/auth/signup/", &body).await?;
        self.store_session_tokens(&response)?;
        invalidate::on_identity_changed(self.cache_mut());
        tracing::info!(email, "registered new user");
        Ok(())
    }

    /// Logs in with email and password
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = json!({
            "email": email,
            "password": password,
        });
        let response = self.anonymous_post("/auth/login/", &body).await?;
        self.store_session_tokens(&response)?;
        invalidate::on_identity_changed(self.cache_mut());
        tracing::info!(email, "logged in");
        Ok(())
    }

    /// Ends the session locally: clears stored tokens and the entire cache
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.token_store().clear()?;
        invalidate::on_identity_changed(self.cache_mut());
        tracing::info!("logged out");
        Ok(())
    }

    /// Fetches the authenticated user's profile, served from cache when fresh
    pub async fn user_details(&mut self) -> Result<UserDetails, ApiError> {
        self.cached_get(Category::UserDetails, DEFAULT_KEY, "/auth/user/", &[])
            .await
    }

    /// Exchanges the refresh token for a new access token
    ///
    /// On failure the stored tokens are cleared and the caller gets a
    /// session-expired error, forcing a fresh login.
    pub(crate) async fn refresh_access_token(&mut self) -> Result<String, ApiError> {
        let tokens = self.token_store().load().ok_or(ApiError::NotLoggedIn)?;

        let body = json!({ "refresh": tokens.refresh });
        match self.anonymous_post("/auth/token/refresh/", &body).await {
            Ok(response) => {
                let access = response
                    .get("access")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ApiError::MissingField("access".to_string()))?
                    .to_string();
                self.token_store().save(&AuthTokens {
                    access: access.clone(),
                    refresh: tokens.refresh,
                })?;
                tracing::debug!("access token refreshed");
                Ok(access)
            }
            Err(ApiError::Backend { .. }) => {
                tracing::warn!("token refresh rejected; clearing stored tokens");
                self.token_store().clear()?;
                Err(ApiError::SessionExpired)
            }
            Err(other) => Err(other),
        }
    }

    /// Stores the token pair from a signup/login response
    fn store_session_tokens(&self, response: &Value) -> Result<(), ApiError> {
        let access = response.get("access").and_then(Value::as_str);
        let refresh = response.get("refresh").and_then(Value::as_str);
        match (access, refresh) {
            (Some(access), Some(refresh)) => {
                self.token_store().save(&AuthTokens {
                    access: access.to_string(),
                    refresh: refresh.to_string(),
                })?;
                Ok(())
            }
            (None, _) => Err(ApiError::MissingField("access".to_string())),
            (_, None) => Err(ApiError::MissingField("refresh".to_string())),
        }
    }
}
