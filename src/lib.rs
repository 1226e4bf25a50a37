//! # stagecue
//!
//! A condition-gated event dispatch core for narrative game engines.
//!
//! ## Design Principles
//!
//! 1. **Channels Over Types**: Listeners subscribe to opaque string channels
//!    ("battle.start", "door.opened"). The dispatcher doesn't interpret them;
//!    the host game assigns meaning.
//!
//! 2. **Non-Owning Subscriptions**: The registry never keeps a subscriber
//!    alive. Listeners and their owners are held by weak reference and a
//!    subscription silently goes stale when either is dropped elsewhere.
//!
//! 3. **Graceful Degradation**: Unmet conditions, unknown channels, stale
//!    subscriptions, and failing listeners are logged and skipped - none of
//!    them aborts a dispatch or crashes the host.
//!
//! ## Architecture
//!
//! - **Single-Threaded Dispatch**: One logical thread of execution (a game
//!   loop tick). `raise_event` is synchronous and runs listeners in
//!   subscription order on the calling thread. Listeners may re-enter the
//!   registry; each raise fans out over a snapshot of the subscriber list.
//!
//! - **Explicit Registry Instance**: There is no process-wide global. The
//!   host constructs one [`EventRegistry`], injects it into producers and
//!   consumers, and tears it down with [`EventRegistry::clear`].
//!
//! ## Modules
//!
//! - `events`: Channels, event records, categories, metadata bags
//! - `conditions`: Boolean gate predicates and the name-keyed factory registry
//! - `dispatch`: The subscription registry and fan-out
//! - `triggers`: Spatial trigger adapter (enter/exit, fire-once latches)
//! - `entity`: Opaque non-owning entity handles
//! - `error`: Listener and adapter error types
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use stagecue::{EntityHandle, EventCategory, EventRecord, EventRegistry, Listener};
//!
//! let registry = EventRegistry::new();
//!
//! // The subscriber owns both the listener closure and the owner handle.
//! let owner: EntityHandle = Rc::new("hud");
//! let seen = Rc::new(Cell::new(0u32));
//! let counter = Rc::clone(&seen);
//! let listener: Listener = Rc::new(move |_event| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//!
//! registry.subscribe("battle.start", &listener, &owner);
//!
//! let record = EventRecord::new("battle.start", EventCategory::Battle, &owner);
//! let outcome = registry.raise_event(&record);
//!
//! assert_eq!(outcome.delivered(), 1);
//! assert_eq!(seen.get(), 1);
//! ```

pub mod conditions;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod events;
pub mod triggers;

// Re-export commonly used types
pub use crate::conditions::{Condition, ConditionRegistry};

pub use crate::dispatch::{EventRegistry, Listener, ListenerFn, RaiseOutcome};

pub use crate::entity::{EntityHandle, EntityRef};

pub use crate::error::{ListenerError, TriggerError};

pub use crate::events::{
    ChannelId, DetailKey, DetailValue, EventCategory, EventRecord, MetadataBag,
};

pub use crate::triggers::{TriggerDirection, TriggerZone, TriggerZoneConfig};
