//! Canonical cache key derivation
//!
//! A cache key is built from named request parameters rendered as
//! `name:value` pairs, sorted by name and joined with `|`. Two parameter
//! sets with the same name/value pairs derive the same key no matter the
//! order they were added in; any value difference changes the key.
//!
//! Canonicalization rules:
//! - a missing numeric parameter renders as the empty string
//! - an omitted boolean flag and an explicit `false` both render as `false`
//!
//! Values must not contain the `|` separator; the parameter domains in use
//! (numbers, booleans, short identifiers) never do.

use std::collections::BTreeMap;

/// Separator between `name:value` pairs in a derived key
pub const SEPARATOR: &str = "|";

/// Fixed key for cached endpoints that take no request parameters
pub const DEFAULT_KEY: &str = "default";

/// Builder for a canonical cache key
///
/// Parameters are kept in a name-ordered map, so insertion order never
/// affects the derived key and re-adding a name overwrites its value.
#[derive(Debug, Clone, Default)]
pub struct KeyParams {
    params: BTreeMap<String, String>,
}

impl KeyParams {
    /// Creates an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a string-valued parameter
    pub fn text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Adds an optional numeric parameter; `None` renders as the empty string
    pub fn opt_u32(&mut self, name: &str, value: Option<u32>) -> &mut Self {
        let rendered = value.map(|n| n.to_string()).unwrap_or_default();
        self.params.insert(name.to_string(), rendered);
        self
    }

    /// Adds a boolean flag
    pub fn flag(&mut self, name: &str, value: bool) -> &mut Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Adds an optional boolean flag; an omitted flag canonicalizes to `false`
    pub fn opt_flag(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        self.flag(name, value.unwrap_or(false))
    }

    /// Derives the canonical key
    pub fn derive(&self) -> String {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (name, value) in &self.params {
            pairs.push(format!("{}:{}", name, value));
        }
        pairs.join(SEPARATOR)
    }
}
