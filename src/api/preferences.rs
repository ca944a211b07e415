//! Macro preference endpoint wrappers

use reqwest::Method;

use super::{invalidate, ApiClient, ApiError};
use crate::cache::{Category, DEFAULT_KEY};
use crate::data::MacroPreferences;

impl ApiClient {
    /// Fetches the user's stored macro preferences, served from cache when
    /// fresh
    pub async fn preferences(&mut self) -> Result<MacroPreferences, ApiError> {
        self.cached_get(
            Category::UserPreferences,
            DEFAULT_KEY,
            "/auth/preferences/",
            &[],
        )
        .await
    }

    /// Updates the user's macro preferences
    ///
    /// On success the meal-option categories are invalidated, since their
    /// contents were derived from the old preferences, along with the
    /// cached copy of the preferences themselves.
    pub async fn update_preferences(
        &mut self,
        preferences: &MacroPreferences,
    ) -> Result<MacroPreferences, ApiError> {
        let body = serde_json::to_value(preferences)?;
        let response = self
            .authorized_request(Method::POST, "/auth/preferences/", &[], Some(&body))
            .await?;
        invalidate::on_preferences_updated(self.cache_mut());
        tracing::info!("macro preferences updated");
        Ok(serde_json::from_value(response)?)
    }
}
