//! Macros On Demand client library
//!
//! A client for the Macros On Demand backend: search for restaurant meals
//! matching macro-nutrient goals, save favorites, and manage preferences,
//! with responses cached in memory per category with TTL expiry.

pub mod api;
pub mod cache;
pub mod cli;
pub mod data;
pub mod sheet;
