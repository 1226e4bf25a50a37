//! Gate conditions for event delivery.
//!
//! A [`Condition`] is a named zero-argument boolean predicate. Records carry
//! an ordered set of them; delivery is gated on all of them holding, checked
//! in insertion order with short-circuit on the first failure.
//!
//! Conditions wrap arbitrary closures over live game state (inventory,
//! health, quest flags), so hosts that pick conditions from data use the
//! [`ConditionRegistry`] to map condition names to predicate factories
//! instead of hard-coding a branch table.

mod condition;
mod registry;

pub use condition::Condition;
pub use registry::ConditionRegistry;
