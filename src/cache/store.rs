//! Category-partitioned response store with TTL expiry
//!
//! Entries live in one of five independent categories and carry an absolute
//! expiry instant. Expiry is checked lazily at read time; there is no
//! background timer. A stale or absent entry is a miss either way, and a
//! miss is an `Option::None`, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::clock::{Clock, SystemClock};

/// A named partition of the cache
///
/// Categories are independent: clearing one never affects another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Meal search results keyed by macro goals
    MealOptions,
    /// Ranked meal search results keyed by macro goals
    RankedMealOptions,
    /// The user's saved meals
    SavedMeals,
    /// The user's profile
    UserDetails,
    /// The user's macro preferences
    UserPreferences,
}

impl Category {
    /// Every category, for full-store operations
    pub const ALL: [Category; 5] = [
        Category::MealOptions,
        Category::RankedMealOptions,
        Category::SavedMeals,
        Category::UserDetails,
        Category::UserPreferences,
    ];

    /// Default TTL for entries in this category
    ///
    /// Search results stay fresh for 15 minutes; profile data uses a
    /// shorter 5 minute window since the user can change it elsewhere.
    pub fn default_ttl(&self) -> Duration {
        match self {
            Category::UserDetails | Category::UserPreferences => Duration::minutes(5),
            _ => Duration::minutes(15),
        }
    }

    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MealOptions => "mealOptions",
            Category::RankedMealOptions => "rankedMealOptions",
            Category::SavedMeals => "savedMeals",
            Category::UserDetails => "userDetails",
            Category::UserPreferences => "userPreferences",
        }
    }
}

/// A cached response with its expiry metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload, structurally opaque to the cache
    value: Value,
    /// When the value was cached
    cached_at: DateTime<Utc>,
    /// Instant after which the entry is stale
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// In-memory response cache with per-entry expiry
///
/// Constructed once per process and passed by reference to callers. All
/// operations are synchronous and take `&mut self`; the surrounding code
/// never awaits between a cache read and the write that follows it, so no
/// locking is needed.
pub struct ResponseCache {
    categories: HashMap<Category, HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl ResponseCache {
    /// Creates an empty cache reading the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading the given clock
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            categories: HashMap::new(),
            clock,
        }
    }

    /// Returns the cached value for `category` + `key` if present and fresh
    ///
    /// An expired entry is evicted on the spot and reported as a miss;
    /// callers cannot distinguish expired from never-written.
    pub fn get(&mut self, category: Category, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let entries = self.categories.get_mut(&category)?;

        let expired = match entries.get(key) {
            None => {
                tracing::debug!(category = category.as_str(), key, "cache miss");
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            entries.remove(key);
            tracing::debug!(category = category.as_str(), key, "cache entry expired");
            return None;
        }

        tracing::debug!(category = category.as_str(), key, "cache hit");
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores a value under `category` + `key` with the category's default TTL
    pub fn insert(&mut self, category: Category, key: &str, value: Value) {
        self.insert_with_ttl(category, key, value, category.default_ttl());
    }

    /// Stores a value with an explicit TTL, overwriting any existing entry
    pub fn insert_with_ttl(&mut self, category: Category, key: &str, value: Value, ttl: Duration) {
        let now = self.clock.now();
        let entry = CacheEntry {
            value,
            cached_at: now,
            expires_at: now + ttl,
        };

        tracing::debug!(
            category = category.as_str(),
            key,
            expires_at = %entry.expires_at,
            "cache write"
        );

        self.categories
            .entry(category)
            .or_default()
            .insert(key.to_string(), entry);
    }

    /// Removes every entry in one category
    pub fn clear(&mut self, category: Category) {
        if let Some(entries) = self.categories.get_mut(&category) {
            let cleared = entries.len();
            entries.clear();
            if cleared > 0 {
                tracing::info!(category = category.as_str(), cleared, "cleared cache category");
            }
        }
    }

    /// Resets the entire store to empty
    pub fn clear_all(&mut self) {
        let cleared = self.len();
        self.categories.clear();
        if cleared > 0 {
            tracing::info!(cleared, "cleared entire cache");
        }
    }

    /// Removes expired entries from every category
    ///
    /// Not required for correctness (reads already treat stale entries as
    /// misses); bounds memory in a long-lived process.
    pub fn evict_expired(&mut self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        for entries in self.categories.values_mut() {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            removed += before - entries.len();
        }
        if removed > 0 {
            tracing::info!(removed, "evicted expired cache entries");
        }
        removed
    }

    /// Total number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.categories.values().map(HashMap::len).sum()
    }

    /// Whether the store holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the entry for `category` + `key` was written, if it exists
    pub fn cached_at(&self, category: Category, key: &str) -> Option<DateTime<Utc>> {
        self.categories
            .get(&category)?
            .get(key)
            .map(|entry| entry.cached_at)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
