//! Channel identifiers.
//!
//! Channels are the named topics listeners subscribe to and events are
//! raised on. The dispatcher treats them as opaque keys.

use serde::{Deserialize, Serialize};

/// Identifier for an event channel.
///
/// Comparison is exact: no trimming, no case folding. `"Battle.Start"` and
/// `"battle.start"` are two different channels. Equal identifiers name the
/// same logical channel regardless of the category of the events raised on
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a new channel identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the identifier is the empty string.
    ///
    /// Empty identifiers are rejected by `EventRegistry::subscribe`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
