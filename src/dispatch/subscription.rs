//! Subscription entries.
//!
//! A subscription pairs a listener closure with the entity that owns it.
//! The registry holds weak references to both: a subscriber that is
//! destroyed elsewhere leaves behind a stale entry that resolves to `None`
//! and is pruned opportunistically, never invoked.

use std::rc::{Rc, Weak};

use crate::entity::{EntityHandle, EntityRef};
use crate::error::ListenerError;
use crate::events::EventRecord;

/// Listener callable signature.
///
/// Listeners report their own failures as `Err`; the registry logs the
/// failure and continues delivering to the remaining subscribers.
pub type ListenerFn = dyn Fn(&EventRecord) -> Result<(), ListenerError>;

/// Shared handle to a listener closure.
///
/// The subscriber keeps this `Rc` alive for as long as it wants to receive
/// events; the registry only holds a weak reference to it.
pub type Listener = Rc<ListenerFn>;

/// One (listener, owner) pair registered under a channel.
#[derive(Clone)]
pub(crate) struct Subscription {
    listener: Weak<ListenerFn>,
    owner: EntityRef,
}

impl Subscription {
    pub(crate) fn new(listener: &Listener, owner: &EntityHandle) -> Self {
        Self {
            listener: Rc::downgrade(listener),
            owner: Rc::downgrade(owner),
        }
    }

    /// Resolve both references. `None` means the subscriber is gone and the
    /// entry is stale.
    ///
    /// The returned owner handle keeps the subscriber alive for the
    /// duration of the invocation it guards.
    pub(crate) fn resolve(&self) -> Option<(Listener, EntityHandle)> {
        let listener = self.listener.upgrade()?;
        let owner = self.owner.upgrade()?;
        Some((listener, owner))
    }

    /// Whether either backing reference is gone.
    pub(crate) fn is_stale(&self) -> bool {
        self.listener.strong_count() == 0 || self.owner.strong_count() == 0
    }

    /// Whether the resolved listener and owner are exactly the given pair.
    ///
    /// Identity is pointer identity; a stale entry matches nothing.
    pub(crate) fn matches(&self, listener: &Listener, owner: &EntityHandle) -> bool {
        match (self.listener.upgrade(), self.owner.upgrade()) {
            (Some(our_listener), Some(our_owner)) => {
                Rc::ptr_eq(&our_listener, listener) && Rc::ptr_eq(&our_owner, owner)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_listener() -> Listener {
        Rc::new(|_event| Ok(()))
    }

    #[test]
    fn test_resolve_while_both_alive() {
        let listener = noop_listener();
        let owner: EntityHandle = Rc::new("chest");
        let subscription = Subscription::new(&listener, &owner);

        assert!(subscription.resolve().is_some());
        assert!(!subscription.is_stale());
    }

    #[test]
    fn test_stale_when_owner_dropped() {
        let listener = noop_listener();
        let owner: EntityHandle = Rc::new("chest");
        let subscription = Subscription::new(&listener, &owner);

        drop(owner);
        assert!(subscription.is_stale());
        assert!(subscription.resolve().is_none());
    }

    #[test]
    fn test_stale_when_listener_dropped() {
        let owner: EntityHandle = Rc::new("chest");
        let subscription = {
            let listener = noop_listener();
            Subscription::new(&listener, &owner)
        };

        assert!(subscription.is_stale());
        assert!(subscription.resolve().is_none());
    }

    #[test]
    fn test_matches_by_identity() {
        let listener = noop_listener();
        let other_listener = noop_listener();
        let owner: EntityHandle = Rc::new("chest");
        let other_owner: EntityHandle = Rc::new("chest");

        let subscription = Subscription::new(&listener, &owner);
        assert!(subscription.matches(&listener, &owner));
        assert!(!subscription.matches(&other_listener, &owner));
        assert!(!subscription.matches(&listener, &other_owner));
    }

    #[test]
    fn test_stale_entry_matches_nothing() {
        let listener = noop_listener();
        let owner: EntityHandle = Rc::new("chest");
        let subscription = Subscription::new(&listener, &owner);

        drop(owner);
        let other_owner: EntityHandle = Rc::new("chest");
        assert!(!subscription.matches(&listener, &other_owner));
    }
}
