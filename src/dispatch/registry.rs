//! The event registry.
//!
//! One registry instance is the process-wide dispatch point: the host
//! constructs it at startup, injects it into every producer and consumer,
//! and clears it at teardown. There is no implicit global.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::entity::EntityHandle;
use crate::events::{ChannelId, EventRecord};

use super::subscription::{Listener, Subscription};

/// Result of one `raise_event` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaiseOutcome {
    /// The record's conditions were not met; nothing was dispatched.
    Suppressed,
    /// No subscriptions exist for the channel. Not an error.
    NoSubscribers,
    /// Fan-out ran to completion over the snapshotted subscriber list.
    Delivered {
        /// Listeners invoked successfully.
        delivered: usize,
        /// Listeners that were invoked and returned an error.
        failed: usize,
        /// Entries skipped because listener or owner no longer resolves.
        stale: usize,
    },
}

impl RaiseOutcome {
    /// Listeners that ran successfully during this raise.
    #[must_use]
    pub fn delivered(&self) -> usize {
        match self {
            RaiseOutcome::Delivered { delivered, .. } => *delivered,
            _ => 0,
        }
    }

    /// Listeners that ran and reported failure during this raise.
    #[must_use]
    pub fn failed(&self) -> usize {
        match self {
            RaiseOutcome::Delivered { failed, .. } => *failed,
            _ => 0,
        }
    }

    /// Stale entries skipped during this raise.
    #[must_use]
    pub fn stale(&self) -> usize {
        match self {
            RaiseOutcome::Delivered { stale, .. } => *stale,
            _ => 0,
        }
    }

    /// Whether the raise was suppressed by an unmet condition.
    #[must_use]
    pub fn was_suppressed(&self) -> bool {
        matches!(self, RaiseOutcome::Suppressed)
    }
}

/// Registry mapping channels to subscriber lists.
///
/// Subscriptions are held without ownership: dropping a listener or its
/// owner anywhere else in the program is enough to retire the
/// subscription. The registry discovers the dead entry on next access and
/// prunes it, rather than keeping it alive or crashing.
///
/// Methods take `&self` so listeners can subscribe, unsubscribe, and raise
/// on the same registry from inside a running dispatch. Each raise fans
/// out over a snapshot: listeners removed mid-raise still receive the
/// current event, listeners added mid-raise receive the next one.
///
/// ## Example
///
/// ```
/// use std::rc::Rc;
/// use stagecue::{EntityHandle, EventCategory, EventRecord, EventRegistry, Listener, RaiseOutcome};
///
/// let registry = EventRegistry::new();
/// let owner: EntityHandle = Rc::new("quest-log");
/// let listener: Listener = Rc::new(|event| {
///     println!("battle against {:?}", event.metadata().get_text("Enemy"));
///     Ok(())
/// });
///
/// registry.subscribe("battle.start", &listener, &owner);
///
/// let record = EventRecord::new("battle.start", EventCategory::Battle, &owner)
///     .with_detail("Enemy", "slime");
/// assert_eq!(registry.raise_event(&record).delivered(), 1);
///
/// // Raising on a channel nobody subscribed to is a silent no-op.
/// let lonely = EventRecord::new("battle.end", EventCategory::Battle, &owner);
/// assert_eq!(registry.raise_event(&lonely), RaiseOutcome::NoSubscribers);
/// ```
#[derive(Default)]
pub struct EventRegistry {
    channels: RefCell<FxHashMap<ChannelId, Vec<Subscription>>>,
}

impl EventRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a (listener, owner) pair under a channel.
    ///
    /// The registry takes no ownership of either. Duplicate subscriptions
    /// are not deduplicated: subscribing the same pair twice produces two
    /// invocations per raise. Callers that need single delivery must not
    /// double-subscribe.
    ///
    /// Panics if the channel identifier is empty - that is a programming
    /// error at the call site, not a recoverable condition.
    pub fn subscribe(
        &self,
        channel: impl Into<ChannelId>,
        listener: &Listener,
        owner: &EntityHandle,
    ) {
        let channel = channel.into();
        assert!(
            !channel.is_empty(),
            "subscribe requires a non-empty channel identifier"
        );
        self.channels
            .borrow_mut()
            .entry(channel)
            .or_default()
            .push(Subscription::new(listener, owner));
    }

    /// Remove every entry under `channel` whose resolved listener and owner
    /// both match the given pair.
    ///
    /// Stale entries are dropped along the way, and the channel bucket is
    /// deleted once empty so the map doesn't accumulate dead channels.
    /// Unsubscribing a pair that was never subscribed is a no-op.
    pub fn unsubscribe(&self, channel: &ChannelId, listener: &Listener, owner: &EntityHandle) {
        let mut channels = self.channels.borrow_mut();
        if let Some(subscriptions) = channels.get_mut(channel) {
            subscriptions.retain(|s| !s.matches(listener, owner) && !s.is_stale());
            if subscriptions.is_empty() {
                channels.remove(channel);
            }
        }
    }

    /// Raise an event: gate on its conditions, then deliver it to every
    /// live subscriber of its channel, synchronously, in subscription
    /// order.
    ///
    /// The subscriber list is snapshotted before the first invocation, so
    /// listeners mutating the registry mid-raise never corrupt or skip the
    /// current fan-out. A listener returning `Err` is logged and does not
    /// stop delivery to the rest. Stale entries are skipped during the
    /// raise and pruned from the backing list afterwards.
    pub fn raise_event(&self, record: &EventRecord) -> RaiseOutcome {
        if !record.can_trigger() {
            log::info!(
                "event on `{}` not raised: conditions not met",
                record.channel()
            );
            return RaiseOutcome::Suppressed;
        }
        record.mark_published();

        let snapshot = {
            let channels = self.channels.borrow();
            match channels.get(record.channel()) {
                Some(subscriptions) => subscriptions.clone(),
                None => return RaiseOutcome::NoSubscribers,
            }
        };

        let mut delivered = 0;
        let mut failed = 0;
        let mut stale = 0;

        for subscription in &snapshot {
            // Resolving returns owning handles, so the subscriber cannot
            // disappear out from under its own invocation.
            let Some((listener, _owner)) = subscription.resolve() else {
                stale += 1;
                continue;
            };
            match listener(record) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    failed += 1;
                    log::warn!("listener on `{}` failed: {}", record.channel(), err);
                }
            }
        }

        if stale > 0 {
            self.prune_channel(record.channel());
        }

        RaiseOutcome::Delivered {
            delivered,
            failed,
            stale,
        }
    }

    /// Drop every stale entry in every channel, deleting channels that
    /// empty out.
    ///
    /// Raise and unsubscribe already prune opportunistically; hosts with
    /// long quiet periods can call this from a maintenance tick.
    pub fn prune_stale(&self) {
        self.channels.borrow_mut().retain(|_, subscriptions| {
            subscriptions.retain(|s| !s.is_stale());
            !subscriptions.is_empty()
        });
    }

    /// Number of live subscriptions under a channel.
    #[must_use]
    pub fn subscriber_count(&self, channel: &ChannelId) -> usize {
        self.channels
            .borrow()
            .get(channel)
            .map_or(0, |subscriptions| {
                subscriptions.iter().filter(|s| !s.is_stale()).count()
            })
    }

    /// Number of channels with at least one entry.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.borrow().len()
    }

    /// Check if no channel has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.borrow().is_empty()
    }

    /// Drop every subscription. The teardown counterpart of constructing
    /// the registry at startup.
    pub fn clear(&self) {
        self.channels.borrow_mut().clear();
    }

    fn prune_channel(&self, channel: &ChannelId) {
        let mut channels = self.channels.borrow_mut();
        if let Some(subscriptions) = channels.get_mut(channel) {
            subscriptions.retain(|s| !s.is_stale());
            if subscriptions.is_empty() {
                channels.remove(channel);
            }
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.channels.borrow();
        let mut map = f.debug_map();
        for (channel, subscriptions) in channels.iter() {
            map.entry(&channel.as_str(), &subscriptions.len());
        }
        map.finish()
    }
}
