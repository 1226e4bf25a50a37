//! Spatial trigger adapter.
//!
//! Translates enter/exit events from the host's collision layer into event
//! records and raises them. The adapter owns everything the dispatch core
//! deliberately doesn't: the fire-once latches, the data-driven condition
//! names, and the pre-dispatch callback. The registry never learns about
//! any of it - by the time `raise_event` is called, a trigger zone's event
//! looks like any other record.

mod zone;

pub use zone::{TriggerDirection, TriggerZone, TriggerZoneConfig};
