//! Reference-counted handler tokens.
//!
//! A [`Handler`] wraps a callable and gives it an identity: clones of one
//! token compare equal by reference, while two tokens built from identical
//! closures are distinct. Removal from a [`Hook`](crate::hook::Hook) matches
//! by that identity, so code that wants to detach later keeps a clone of the
//! token it added.

use std::fmt;
use std::sync::Arc;

use crate::args::HookArgs;

// ─────────────────────────────────────────────────────────────────────────────
// Handler
// ─────────────────────────────────────────────────────────────────────────────

/// A callable registered against a [`Hook`](crate::hook::Hook), invoked with
/// the arguments passed to `fire`.
///
/// # Identity
///
/// `Handler` is a cheap clonable token. All clones refer to the same
/// underlying callable and count as the *same* handler for
/// [`Hook::remove`](crate::hook::Hook::remove): adding one token twice
/// registers it twice, and removing it detaches both occurrences.
///
/// # Example
///
/// ```
/// use tocsin_hooks::{Handler, HookRegistry};
///
/// let registry = HookRegistry::new();
/// let handler = Handler::new(|_args| { /* react */ });
///
/// registry.hook("doc.ready").add(handler.clone());
/// registry.hook("doc.ready").remove(&handler);
/// ```
#[derive(Clone)]
pub struct Handler {
    callable: Arc<dyn Fn(&HookArgs) + Send + Sync>,
}

impl Handler {
    /// Wraps a closure into a handler token.
    pub fn new(callable: impl Fn(&HookArgs) + Send + Sync + 'static) -> Self {
        Self {
            callable: Arc::new(callable),
        }
    }

    /// Calls the underlying callable with `args`.
    pub(crate) fn invoke(&self, args: &HookArgs) {
        (self.callable)(args);
    }

    /// Whether two tokens refer to the same underlying callable.
    #[must_use]
    pub fn same(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callable", &Arc::as_ptr(&self.callable))
            .finish()
    }
}
