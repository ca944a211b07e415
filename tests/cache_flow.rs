//! End-to-end cache behavior through the public library surface:
//! key derivation, TTL expiry against a manual clock, and the
//! invalidation paths the API client runs on mutating calls.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use macrosod::api::{invalidate, ApiClient, TokenStore};
use macrosod::cache::{Category, KeyParams, ManualClock, ResponseCache, DEFAULT_KEY};
use macrosod::data::{AuthTokens, MacroGoals};

fn manual_cache() -> (ResponseCache, ManualClock) {
    let clock = ManualClock::new(Utc::now());
    let cache = ResponseCache::with_clock(Arc::new(clock.clone()));
    (cache, clock)
}

#[test]
fn derived_keys_ignore_construction_order() {
    let mut forward = KeyParams::new();
    forward
        .opt_u32("calories", Some(2000))
        .opt_u32("carbs", Some(200))
        .opt_u32("fats", Some(60))
        .opt_u32("protein", Some(150));

    let mut reversed = KeyParams::new();
    reversed
        .opt_u32("protein", Some(150))
        .opt_u32("fats", Some(60))
        .opt_u32("carbs", Some(200))
        .opt_u32("calories", Some(2000));

    assert_eq!(forward.derive(), reversed.derive());
}

#[test]
fn derived_keys_differ_when_any_value_differs() {
    let base = MacroGoals {
        calories: Some(2000),
        protein: Some(150),
        carbs: Some(200),
        fats: Some(60),
    };
    let mut tweaked = base;
    tweaked.fats = Some(61);

    assert_ne!(base.cache_key(), tweaked.cache_key());

    let mut missing = base;
    missing.fats = None;
    assert_ne!(base.cache_key(), missing.cache_key());
}

#[test]
fn macro_goals_derive_the_documented_key() {
    let goals = MacroGoals {
        calories: Some(2000),
        protein: Some(150),
        carbs: Some(200),
        fats: Some(60),
    };
    assert_eq!(goals.cache_key(), "calories:2000|carbs:200|fats:60|protein:150");
}

#[test]
fn write_then_immediate_read_returns_exact_value() {
    let (mut cache, _clock) = manual_cache();
    let value = json!({
        "count": 1,
        "valid_meals": [{"restaurant": "Chipotle", "calories": 700.0}]
    });

    cache.insert(Category::MealOptions, "k", value.clone());

    assert_eq!(cache.get(Category::MealOptions, "k"), Some(value));
}

#[test]
fn meal_options_entry_expires_after_900000_ms() {
    let (mut cache, clock) = manual_cache();
    let key = "calories:2000|carbs:200|fats:60|protein:150";
    let value = json!({"count": 0, "valid_meals": []});

    cache.insert_with_ttl(
        Category::MealOptions,
        key,
        value.clone(),
        Duration::milliseconds(900_000),
    );

    assert_eq!(cache.get(Category::MealOptions, key), Some(value));

    clock.advance(Duration::milliseconds(900_001));

    assert_eq!(cache.get(Category::MealOptions, key), None);
}

#[test]
fn expiry_happens_without_an_explicit_clear() {
    let (mut cache, clock) = manual_cache();
    cache.insert(Category::UserDetails, DEFAULT_KEY, json!({"email": "a@x.com"}));

    clock.advance(Duration::minutes(6));

    assert_eq!(cache.get(Category::UserDetails, DEFAULT_KEY), None);
}

#[test]
fn clearing_meal_options_leaves_saved_meals_intact() {
    let (mut cache, _clock) = manual_cache();
    cache.insert(Category::MealOptions, "a", json!(1));
    cache.insert(Category::MealOptions, "b", json!(2));
    cache.insert(Category::SavedMeals, DEFAULT_KEY, json!([{"restaurant": "Subway"}]));

    cache.clear(Category::MealOptions);

    assert_eq!(cache.get(Category::MealOptions, "a"), None);
    assert_eq!(cache.get(Category::MealOptions, "b"), None);
    assert!(cache.get(Category::SavedMeals, DEFAULT_KEY).is_some());
}

#[test]
fn clearing_all_categories_misses_everywhere() {
    let (mut cache, _clock) = manual_cache();
    for category in Category::ALL {
        cache.insert(category, DEFAULT_KEY, json!({"seed": true}));
    }

    cache.clear_all();

    for category in Category::ALL {
        assert_eq!(cache.get(category, DEFAULT_KEY), None);
    }
}

#[test]
fn preference_update_path_invalidates_derived_results() {
    let (mut cache, _clock) = manual_cache();
    cache.insert(Category::MealOptions, "calories:2000", json!(1));
    cache.insert(Category::RankedMealOptions, "calories:2000", json!(2));
    cache.insert(Category::UserPreferences, DEFAULT_KEY, json!({"calories_goal": 1800}));
    cache.insert(Category::SavedMeals, DEFAULT_KEY, json!([]));

    invalidate::on_preferences_updated(&mut cache);

    assert_eq!(cache.get(Category::MealOptions, "calories:2000"), None);
    assert_eq!(cache.get(Category::RankedMealOptions, "calories:2000"), None);
    assert_eq!(cache.get(Category::UserPreferences, DEFAULT_KEY), None);
    assert!(cache.get(Category::SavedMeals, DEFAULT_KEY).is_some());
}

#[test]
fn logout_path_clears_user_details() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let tokens = TokenStore::with_dir(temp_dir.path().to_path_buf());
    tokens
        .save(&AuthTokens {
            access: "access".to_string(),
            refresh: "refresh".to_string(),
        })
        .expect("Save should succeed");

    let mut client = ApiClient::new("http://localhost:8000/api", tokens, ResponseCache::new());
    client
        .cache_mut()
        .insert(Category::UserDetails, DEFAULT_KEY, json!({"email": "a@x.com"}));

    client.logout().expect("Logout should succeed");

    assert_eq!(client.cache_mut().get(Category::UserDetails, DEFAULT_KEY), None);
    assert!(!client.is_logged_in());
}

#[test]
fn omitted_and_explicit_false_flags_share_a_cache_entry() {
    let (mut cache, _clock) = manual_cache();

    let mut omitted = KeyParams::new();
    omitted.opt_u32("calories", Some(800));
    omitted.opt_flag("ranked", None);

    let mut explicit = KeyParams::new();
    explicit.opt_u32("calories", Some(800));
    explicit.opt_flag("ranked", Some(false));

    cache.insert(Category::MealOptions, &omitted.derive(), json!({"count": 3}));

    assert_eq!(
        cache.get(Category::MealOptions, &explicit.derive()),
        Some(json!({"count": 3}))
    );
}
