//! In-memory response cache for backend API calls
//!
//! Cached responses are partitioned into independent categories, expire
//! after a per-category TTL, and are invalidated in coarse category-sized
//! chunks when a mutating call makes them stale.

pub mod clock;
pub mod key;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{KeyParams, DEFAULT_KEY};
pub use store::{Category, ResponseCache};
