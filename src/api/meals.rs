//! Meal search and saved-meal endpoint wrappers
//!
//! Search results are cached per macro-goal combination; the cache key is
//! the canonical rendering of the goals, so the same targets entered in
//! any order hit the same entry.

use reqwest::Method;
use serde_json::Value;

use super::{invalidate, ApiClient, ApiError};
use crate::cache::{Category, DEFAULT_KEY};
use crate::data::{MacroGoals, Meal, MealOptions, SaveMealRequest, SavedMeal};

/// Wired route for plain meal search
const MEAL_OPTIONS_PATH: &str = "/search/meal-options/";

/// Wired route for ranked meal search (the project urlconf routes
/// `ranked-meals/`, not the `ranked/` of the app-level draft)
const RANKED_MEALS_PATH: &str = "/search/ranked-meals/";

impl ApiClient {
    /// Fetches meal options matching the given macro goals
    pub async fn meal_options(&mut self, goals: &MacroGoals) -> Result<MealOptions, ApiError> {
        self.cached_get(
            Category::MealOptions,
            &goals.cache_key(),
            MEAL_OPTIONS_PATH,
            &goals.query_params(),
        )
        .await
    }

    /// Fetches ranked meal options matching the given macro goals
    pub async fn ranked_meal_options(
        &mut self,
        goals: &MacroGoals,
    ) -> Result<MealOptions, ApiError> {
        self.cached_get(
            Category::RankedMealOptions,
            &goals.cache_key(),
            RANKED_MEALS_PATH,
            &goals.query_params(),
        )
        .await
    }

    /// Saves a meal to the user's favorites
    ///
    /// On success the saved-meals category is invalidated; search results
    /// are unaffected.
    pub async fn save_meal(&mut self, meal: &SaveMealRequest) -> Result<Meal, ApiError> {
        let body = serde_json::to_value(meal)?;
        let response = self
            .authorized_request(Method::POST, "/auth/save-meal/", &[], Some(&body))
            .await?;
        invalidate::on_saved_meals_changed(self.cache_mut());
        tracing::info!(restaurant = %meal.restaurant, "meal saved");

        let saved = response
            .get("meal")
            .cloned()
            .ok_or_else(|| ApiError::MissingField("meal".to_string()))?;
        Ok(serde_json::from_value(saved)?)
    }

    /// Fetches the user's saved meals, served from cache when fresh
    pub async fn saved_meals(&mut self) -> Result<Vec<SavedMeal>, ApiError> {
        let value: Value = self
            .cached_get(Category::SavedMeals, DEFAULT_KEY, "/auth/saved-meals/", &[])
            .await?;
        parse_saved_meals(value)
    }
}

/// Parses the saved-meals list
///
/// The endpoint returns a list of `{meal, food_items}` wrappers; an older
/// draft returned bare meal objects, so both item shapes are accepted.
fn parse_saved_meals(value: Value) -> Result<Vec<SavedMeal>, ApiError> {
    let Value::Array(items) = value else {
        return Err(ApiError::MissingField("saved meals list".to_string()));
    };

    let mut meals = Vec::with_capacity(items.len());
    for item in items {
        let saved = if item.get("meal").is_some() {
            serde_json::from_value(item)?
        } else {
            SavedMeal {
                meal: serde_json::from_value(item)?,
                food_items: Vec::new(),
            }
        };
        meals.push(saved);
    }
    Ok(meals)
}
