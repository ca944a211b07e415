//! Core data models for the Macros On Demand client
//!
//! This module contains the data types exchanged with the backend:
//! macro goals, meals, user details, preferences, and auth tokens.
//! Field names mirror the backend serializers.

use serde::{Deserialize, Serialize};

use crate::cache::key::KeyParams;

/// Macro-nutrient targets for a meal search
///
/// All fields are optional: an omitted field is sent as an empty query
/// parameter (the backend applies its own default) and canonicalizes to the
/// empty string in the derived cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGoals {
    /// Calorie limit in kcal
    pub calories: Option<u32>,
    /// Protein limit in grams
    pub protein: Option<u32>,
    /// Carbohydrate limit in grams
    pub carbs: Option<u32>,
    /// Fat limit in grams
    pub fats: Option<u32>,
}

impl MacroGoals {
    /// Query parameters in the order the backend documents them
    ///
    /// Missing fields become empty strings, matching the original client.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        fn render(v: Option<u32>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }
        vec![
            ("calories", render(self.calories)),
            ("protein", render(self.protein)),
            ("carbs", render(self.carbs)),
            ("fats", render(self.fats)),
        ]
    }

    /// Canonical cache key for these goals
    pub fn cache_key(&self) -> String {
        let mut params = KeyParams::new();
        params.opt_u32("calories", self.calories);
        params.opt_u32("protein", self.protein);
        params.opt_u32("carbs", self.carbs);
        params.opt_u32("fats", self.fats);
        params.derive()
    }
}

/// A candidate meal returned by the search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Database id, present once the meal has been saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Restaurant offering the meal
    pub restaurant: String,
    /// Total calories in kcal
    #[serde(default)]
    pub calories: f64,
    /// Total protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Total carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Total fat in grams
    #[serde(default)]
    pub fats: f64,
    /// Ids of the food items making up the meal
    #[serde(default)]
    pub food_item_ids: Vec<String>,
}

/// Response envelope for the meal search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealOptions {
    /// Number of valid meals found
    #[serde(default)]
    pub count: usize,
    /// The meals themselves
    #[serde(default)]
    pub valid_meals: Vec<Meal>,
}

/// A single menu item from a restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub item_name: String,
    #[serde(default)]
    pub restaurant: String,
    #[serde(default)]
    pub food_category: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbohydrates: f64,
    #[serde(default)]
    pub fats: f64,
}

/// One entry from the saved-meals endpoint: the meal plus the full food
/// item details the backend joins in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMeal {
    /// The saved meal
    pub meal: Meal,
    /// Food items making up the meal, when the backend includes them
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
}

/// A saved-meal reference as it appears inside the user profile
///
/// The backend drafts disagree on this field: one serializes a list of
/// primary keys, another embeds the meal with its stored food item ids.
/// All shapes deserialize so a profile fetch never fails on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedMealRef {
    /// Primary key as a string (ObjectId)
    Id(String),
    /// Numeric primary key
    Pk(i64),
    /// Embedded meal with the stored food item ids
    Entry {
        meal: Meal,
        #[serde(default)]
        food_item_ids: Vec<String>,
    },
}

/// Macro totals attached to a saved meal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Request body for saving a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMealRequest {
    pub restaurant: String,
    pub food_item_ids: Vec<String>,
    pub macros: MacroTotals,
}

/// The authenticated user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Numeric primary key, unlike meal ids which are ObjectId strings
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub calories_goal: Option<u32>,
    #[serde(default)]
    pub protein_goal: Option<u32>,
    #[serde(default)]
    pub carbs_goal: Option<u32>,
    #[serde(default)]
    pub fats_goal: Option<u32>,
    #[serde(default)]
    pub saved_meals: Vec<SavedMealRef>,
}

/// The user's stored macro preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroPreferences {
    #[serde(default)]
    pub calories_goal: Option<u32>,
    #[serde(default)]
    pub protein_goal: Option<u32>,
    #[serde(default)]
    pub carbs_goal: Option<u32>,
    #[serde(default)]
    pub fats_goal: Option<u32>,
}

/// JWT token pair issued by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived access token, sent as a bearer header
    pub access: String,
    /// Long-lived refresh token
    pub refresh: String,
}
