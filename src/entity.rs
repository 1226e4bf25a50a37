//! Opaque entity handles.
//!
//! The dispatcher never owns the game objects that produce or consume
//! events. Hosts keep their entities alive in `Rc` handles and hand the
//! registry non-owning [`EntityRef`]s; a dropped entity simply stops
//! resolving.
//!
//! `dyn Any` keeps the handle opaque: the dispatcher never downcasts, it
//! only checks liveness and pointer identity.

use std::any::Any;
use std::rc::{Rc, Weak};

/// Owning handle to a host entity (an interactable, a trigger volume, a UI
/// panel - anything that subscribes to or originates events).
pub type EntityHandle = Rc<dyn Any>;

/// Non-owning reference to a host entity.
///
/// Resolving yields `None` once the last [`EntityHandle`] is dropped.
pub type EntityRef = Weak<dyn Any>;
