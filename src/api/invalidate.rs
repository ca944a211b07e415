//! Cache invalidation policy
//!
//! The cache itself only knows how to clear categories; which categories a
//! given mutation makes stale is decided here. Invalidation is coarse by
//! design: whole categories, never individual keys.

use crate::cache::{Category, ResponseCache};

/// The signed-in principal changed (login, registration, logout)
///
/// Everything cached belongs to the previous identity, so the whole store
/// goes.
pub fn on_identity_changed(cache: &mut ResponseCache) {
    cache.clear_all();
}

/// The user's macro preferences were updated
///
/// Meal results are derived from the preferences, and the cached copy of
/// the preferences themselves is stale after the write.
pub fn on_preferences_updated(cache: &mut ResponseCache) {
    cache.clear(Category::MealOptions);
    cache.clear(Category::RankedMealOptions);
    cache.clear(Category::UserPreferences);
}

/// A meal was saved or deleted
pub fn on_saved_meals_changed(cache: &mut ResponseCache) {
    cache.clear(Category::SavedMeals);
}
