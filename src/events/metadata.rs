//! Per-event metadata bags.
//!
//! Each event record carries a key/value bag of details - the speaker of a
//! dialogue line, the id of the interactable that fired, the channel of a
//! follow-up event. The dispatcher doesn't interpret details; producers and
//! listeners agree on keys.
//!
//! ## DetailValue Types
//!
//! - `Int`: Numbers (damage, counts, ids)
//! - `Float`: Fractional values (durations, distances)
//! - `Bool`: Flags
//! - `Text`: Strings (names, speaker ids)
//! - `Channel`: Reference to another event channel (follow-up chaining)

use std::borrow::Borrow;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::channel::ChannelId;

/// Key for a metadata detail.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailKey(pub String);

impl DetailKey {
    /// Create a new detail key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DetailKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DetailKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for DetailKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Value of a metadata detail.
///
/// A small tagged union instead of a fully dynamic value: lookups stay
/// type-safe and the bag stays serializable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetailValue {
    /// Integer value.
    Int(i64),
    /// Fractional value.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Text value.
    Text(String),
    /// Reference to another channel (e.g. a follow-up event to raise).
    Channel(ChannelId),
}

impl DetailValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DetailValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float if this is a Float value.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DetailValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DetailValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DetailValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as channel reference if this is a Channel value.
    #[must_use]
    pub fn as_channel(&self) -> Option<&ChannelId> {
        match self {
            DetailValue::Channel(c) => Some(c),
            _ => None,
        }
    }
}

// Convenient From implementations
impl From<i64> for DetailValue {
    fn from(v: i64) -> Self {
        DetailValue::Int(v)
    }
}

impl From<i32> for DetailValue {
    fn from(v: i32) -> Self {
        DetailValue::Int(v as i64)
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        DetailValue::Float(v)
    }
}

impl From<bool> for DetailValue {
    fn from(v: bool) -> Self {
        DetailValue::Bool(v)
    }
}

impl From<&str> for DetailValue {
    fn from(v: &str) -> Self {
        DetailValue::Text(v.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(v: String) -> Self {
        DetailValue::Text(v)
    }
}

impl From<ChannelId> for DetailValue {
    fn from(v: ChannelId) -> Self {
        DetailValue::Channel(v)
    }
}

/// Key/value store scoped to one event record.
///
/// Keys are unique; writing an existing key replaces its value
/// (last-write-wins). Lookup order is independent per key - the bag makes
/// no ordering guarantee.
///
/// ## Example
///
/// ```
/// use stagecue::MetadataBag;
///
/// let mut bag = MetadataBag::new();
/// bag.add_detail("Speaker", "elder");
/// bag.add_detail("LineCount", 4i64);
///
/// assert_eq!(bag.try_get_detail("Speaker").and_then(|v| v.as_text()), Some("elder"));
/// assert!(bag.try_get_detail("Music").is_none());
///
/// bag.clear_details();
/// assert!(bag.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataBag {
    details: FxHashMap<DetailKey, DetailValue>,
}

impl MetadataBag {
    /// Create a new empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a detail. Replaces any existing value under the same key and
    /// returns the displaced value.
    pub fn add_detail(
        &mut self,
        key: impl Into<DetailKey>,
        value: impl Into<DetailValue>,
    ) -> Option<DetailValue> {
        self.details.insert(key.into(), value.into())
    }

    /// Look up a detail by key.
    #[must_use]
    pub fn try_get_detail(&self, key: &str) -> Option<&DetailValue> {
        self.details.get(key)
    }

    /// Check whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.details.contains_key(key)
    }

    /// Remove every detail.
    pub fn clear_details(&mut self) {
        self.details.clear();
    }

    /// Iterate all details. No ordering guarantee.
    pub fn all_details(&self) -> impl Iterator<Item = (&DetailKey, &DetailValue)> {
        self.details.iter()
    }

    /// Number of details in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Check if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Get an integer detail, or a default.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.try_get_detail(key)
            .and_then(DetailValue::as_int)
            .unwrap_or(default)
    }

    /// Get a boolean detail, or a default.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.try_get_detail(key)
            .and_then(DetailValue::as_bool)
            .unwrap_or(default)
    }

    /// Get a text detail, or None.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.try_get_detail(key).and_then(DetailValue::as_text)
    }
}
