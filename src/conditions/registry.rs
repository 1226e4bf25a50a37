//! Condition factory registry.
//!
//! Hosts that author triggers in data refer to conditions by name
//! ("has_boss_key", "night_time"). The registry maps those names to
//! predicate factories, populated once at startup, so adapters can attach
//! conditions without a hard-coded branch table.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::condition::Condition;

type ConditionFactory = Rc<dyn Fn() -> Condition>;

/// Registry of named condition factories.
///
/// ## Example
///
/// ```
/// use stagecue::ConditionRegistry;
///
/// let mut registry = ConditionRegistry::new();
/// registry.register("always", stagecue::Condition::always);
///
/// let condition = registry.build("always").unwrap();
/// assert!(condition.evaluate());
/// assert!(registry.build("unknown").is_none());
/// ```
#[derive(Clone, Default)]
pub struct ConditionRegistry {
    factories: FxHashMap<String, ConditionFactory>,
}

impl ConditionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a name.
    ///
    /// Panics if the name is already registered: two factories competing
    /// for one name is a startup programming error.
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn() -> Condition + 'static) {
        let name = name.into();
        if self.factories.contains_key(&name) {
            panic!("condition `{}` already registered", name);
        }
        self.factories.insert(name, Rc::new(factory));
    }

    /// Instantiate the condition registered under `name`.
    #[must_use]
    pub fn build(&self, name: &str) -> Option<Condition> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Iterate registered names. No ordering guarantee.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("len", &self.factories.len())
            .finish()
    }
}
