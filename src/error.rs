//! Error types.
//!
//! Almost everything in this crate degrades gracefully instead of erroring:
//! unmet conditions, unknown channels, and stale subscriptions are outcomes,
//! not `Err`s. The two errors that do exist are values a caller can inspect:
//! a listener reporting its own failure, and a trigger adapter unable to
//! assemble a record.

use thiserror::Error;

/// Failure reported by a listener invocation.
///
/// A failing listener never aborts the raise it is part of; the registry
/// logs the error and delivery continues with the remaining subscribers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create a new listener error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Failure hit by a trigger adapter while assembling an event record.
///
/// Adapter failures are logged at the adapter and the raise is skipped;
/// they are never surfaced through the registry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    /// A condition name had no registered factory.
    #[error("no condition named `{0}` is registered")]
    UnknownCondition(String),

    /// A detail the adapter requires was missing from the record's metadata.
    #[error("required detail `{0}` is missing from event metadata")]
    MissingDetail(String),
}
