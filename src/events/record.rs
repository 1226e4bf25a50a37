//! Event records.
//!
//! An `EventRecord` is one occurrence, built by a producer and handed to the
//! registry for fan-out. Channel, category, and originator are fixed at
//! construction; metadata and conditions belong to the producer until the
//! record is first raised.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::conditions::Condition;
use crate::entity::{EntityHandle, EntityRef};

use super::channel::ChannelId;
use super::metadata::{DetailKey, DetailValue, MetadataBag};

/// Category of an event.
///
/// Listeners subscribe by channel, not category; the category is carried so
/// consumers can route without parsing channel names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Scripted scene playback.
    Cutscene,
    /// Conversation lines and choices.
    Dialogue,
    /// Combat encounters.
    Battle,
    /// World object interactions.
    Interactable,
    /// Anything the host defines outside the built-in categories.
    Custom,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventCategory::Cutscene => "Cutscene",
            EventCategory::Dialogue => "Dialogue",
            EventCategory::Battle => "Battle",
            EventCategory::Interactable => "Interactable",
            EventCategory::Custom => "Custom",
        };
        write!(f, "{}", name)
    }
}

/// One event occurrence.
///
/// A record is disposable: raise it, let listeners read it, drop it. The
/// registry never retains records after dispatch, and re-raising the same
/// record is allowed (it dispatches again - the record carries no
/// already-fired flag).
///
/// ## Example
///
/// ```
/// use std::rc::Rc;
/// use stagecue::{Condition, EntityHandle, EventCategory, EventRecord};
///
/// let shrine: EntityHandle = Rc::new("shrine");
/// let mut record = EventRecord::new("shrine.touched", EventCategory::Interactable, &shrine)
///     .with_detail("InteractionID", "shrine_07");
///
/// record.add_condition(Condition::new("player_alive", || true));
/// assert!(record.can_trigger());
/// ```
#[derive(Debug)]
pub struct EventRecord {
    channel: ChannelId,
    category: EventCategory,
    originator: EntityRef,
    metadata: MetadataBag,
    conditions: SmallVec<[Condition; 2]>,
    /// Set by the registry on first dispatch; guards producer-side mutation.
    published: Cell<bool>,
}

impl EventRecord {
    /// Create a new record with an empty metadata bag.
    ///
    /// The originator is held weakly - constructing a record does not keep
    /// the producing entity alive.
    pub fn new(
        channel: impl Into<ChannelId>,
        category: EventCategory,
        originator: &EntityHandle,
    ) -> Self {
        Self {
            channel: channel.into(),
            category,
            originator: Rc::downgrade(originator),
            metadata: MetadataBag::new(),
            conditions: SmallVec::new(),
            published: Cell::new(false),
        }
    }

    /// Replace the metadata bag (builder pattern).
    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataBag) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add one detail (builder pattern).
    #[must_use]
    pub fn with_detail(
        mut self,
        key: impl Into<DetailKey>,
        value: impl Into<DetailValue>,
    ) -> Self {
        self.metadata.add_detail(key, value);
        self
    }

    /// Add a gating condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.add_condition(condition);
        self
    }

    /// The channel this record is raised on.
    #[must_use]
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// The record's category.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Resolve the originator, if it is still alive.
    #[must_use]
    pub fn originator(&self) -> Option<EntityHandle> {
        self.originator.upgrade()
    }

    /// The record's metadata.
    #[must_use]
    pub fn metadata(&self) -> &MetadataBag {
        &self.metadata
    }

    /// Mutable access to the metadata, for the producer before dispatch.
    pub fn metadata_mut(&mut self) -> &mut MetadataBag {
        debug_assert!(
            !self.published.get(),
            "event metadata must not be mutated after dispatch"
        );
        &mut self.metadata
    }

    /// Append a gating condition.
    ///
    /// Legal only before the record is raised. Conditions evaluate in
    /// insertion order.
    pub fn add_condition(&mut self, condition: Condition) {
        debug_assert!(
            !self.published.get(),
            "conditions must not be added after dispatch"
        );
        self.conditions.push(condition);
    }

    /// Number of attached conditions.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Evaluate every attached condition, in insertion order, stopping at
    /// the first `false`.
    ///
    /// A record with zero conditions is always triggerable.
    #[must_use]
    pub fn can_trigger(&self) -> bool {
        for condition in &self.conditions {
            if !condition.evaluate() {
                log::debug!(
                    "event on `{}` gated by condition `{}`",
                    self.channel,
                    condition.name()
                );
                return false;
            }
        }
        true
    }

    /// Whether this record has been dispatched at least once.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published.get()
    }

    pub(crate) fn mark_published(&self) {
        self.published.set(true);
    }
}
