//! Event channels, records, and metadata.
//!
//! An [`EventRecord`] is one occurrence: the channel it is raised on, a
//! typed category, a non-owning back-reference to whatever produced it, a
//! key/value [`MetadataBag`], and the conditions gating its delivery.
//!
//! Records are built by a producer, raised once (or more - nothing stops a
//! producer re-raising the same record), and dropped. No component retains
//! them after dispatch.

mod channel;
mod metadata;
mod record;

pub use channel::ChannelId;
pub use metadata::{DetailKey, DetailValue, MetadataBag};
pub use record::{EventCategory, EventRecord};
