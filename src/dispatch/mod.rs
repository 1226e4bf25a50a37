//! The subscription registry and fan-out.
//!
//! Maps channels to ordered lists of (listener, owner) pairs held by weak
//! reference, and performs condition-gated synchronous dispatch. Everything
//! here assumes one logical thread of execution; listeners may re-enter the
//! registry during a raise. A multi-threaded host must wrap the registry in
//! a single mutex serializing subscribe/unsubscribe/raise - raise-time work
//! is fast enough that finer-grained locking buys nothing.

mod registry;
mod subscription;

pub use registry::{EventRegistry, RaiseOutcome};
pub use subscription::{Listener, ListenerFn};
