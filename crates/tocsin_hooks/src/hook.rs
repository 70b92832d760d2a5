//! A single named event channel.
//!
//! A [`Hook`] owns an ordered handler list and the memoized arguments of its
//! most recent fire. Firing broadcasts synchronously, in registration order;
//! adding a handler after a fire replays the memoized arguments to it right
//! away. Handlers run outside the channel's lock, so a handler may add,
//! remove, or fire on its own hook while it runs.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::args::HookArgs;
use crate::handler::Handler;

// ─────────────────────────────────────────────────────────────────────────────
// Hook
// ─────────────────────────────────────────────────────────────────────────────

/// A named, independent event channel.
///
/// Obtained from [`HookRegistry::hook`](crate::registry::HookRegistry::hook).
/// `Hook` is a cheap clonable handle; every clone for a given name observes
/// the same handler list and memo, so handles can be passed to code that
/// fires or observes the event without knowing its name.
///
/// # Ordering and snapshots
///
/// [`fire`](Self::fire) invokes the handlers that were registered at the
/// moment of the call, in registration order. A handler that mutates the
/// channel mid-fire changes future calls, never the in-progress one.
///
/// # Memoization
///
/// The arguments of the most recent fire are kept (overwritten on each fire,
/// never accumulated) and replayed to handlers added afterwards. See
/// [`add`](Self::add).
///
/// # Panic policy
///
/// A panicking handler never suppresses the remaining handlers of the same
/// call. The panic is caught, logged at ERROR level with the hook name, and
/// not re-propagated; `fire` always runs every snapshotted handler and
/// returns normally.
#[derive(Clone)]
pub struct Hook {
    inner: Arc<HookInner>,
}

struct HookInner {
    name: String,
    state: Mutex<HookState>,
}

#[derive(Default)]
struct HookState {
    handlers: Vec<Handler>,
    memo: Option<HookArgs>,
}

impl Hook {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(HookInner {
                name: name.into(),
                state: Mutex::new(HookState::default()),
            }),
        }
    }

    /// The event name this channel was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Registers a handler at the end of the handler list.
    ///
    /// If this hook has already fired, `handler` is invoked immediately and
    /// synchronously with the memoized arguments, before `add` returns. The
    /// same token may be added more than once; each occurrence is invoked.
    pub fn add(&self, handler: Handler) -> &Self {
        let memo = {
            let mut state = self.inner.state.lock();
            state.handlers.push(handler.clone());
            state.memo.clone()
        };
        if let Some(args) = memo {
            self.invoke_isolated(&handler, &args);
        }
        self
    }

    /// Registers several handlers in the order given.
    ///
    /// All handlers are appended first; if a memo exists, each handler passed
    /// to this call is then replayed with it, in the order passed. Passing no
    /// handlers is a no-op.
    pub fn add_all(&self, handlers: impl IntoIterator<Item = Handler>) -> &Self {
        let added: Vec<Handler> = handlers.into_iter().collect();
        let memo = {
            let mut state = self.inner.state.lock();
            state.handlers.extend(added.iter().cloned());
            state.memo.clone()
        };
        if let Some(args) = memo {
            for handler in &added {
                self.invoke_isolated(handler, &args);
            }
        }
        self
    }

    /// Wraps `callable` into a [`Handler`], registers it, and returns the
    /// token for later removal.
    ///
    /// Replay semantics are those of [`add`](Self::add).
    pub fn observe(&self, callable: impl Fn(&HookArgs) + Send + Sync + 'static) -> Handler {
        let handler = Handler::new(callable);
        self.add(handler.clone());
        handler
    }

    /// Fires the event with `args`.
    ///
    /// Overwrites the memoized arguments unconditionally, then invokes every
    /// currently registered handler in registration order. Firing with no
    /// handlers still updates the memo.
    pub fn fire(&self, args: impl Into<HookArgs>) -> &Self {
        let args = args.into();
        let snapshot = {
            let mut state = self.inner.state.lock();
            state.memo = Some(args.clone());
            state.handlers.clone()
        };
        for handler in &snapshot {
            self.invoke_isolated(handler, &args);
        }
        self
    }

    /// Detaches all occurrences of `handler` from the handler list.
    ///
    /// Matching is by token identity (see [`Handler::same`]); removing a
    /// token that was never added is a no-op. The memo is untouched.
    pub fn remove(&self, handler: &Handler) -> &Self {
        let mut state = self.inner.state.lock();
        state.handlers.retain(|registered| !registered.same(handler));
        self
    }

    /// Detaches all occurrences of each given token.
    pub fn remove_all<'a>(&self, handlers: impl IntoIterator<Item = &'a Handler>) -> &Self {
        let mut state = self.inner.state.lock();
        for handler in handlers {
            state.handlers.retain(|registered| !registered.same(handler));
        }
        self
    }

    /// Number of currently registered handler occurrences.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.inner.state.lock().handlers.len()
    }

    /// Whether this hook has fired at least once.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.inner.state.lock().memo.is_some()
    }

    /// The memoized arguments of the most recent fire, if any.
    #[must_use]
    pub fn last_args(&self) -> Option<HookArgs> {
        self.inner.state.lock().memo.clone()
    }

    /// Whether two handles refer to the same channel.
    #[must_use]
    pub fn same_channel(&self, other: &Hook) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn invoke_isolated(&self, handler: &Handler, args: &HookArgs) {
        let outcome = catch_unwind(AssertUnwindSafe(|| handler.invoke(args)));
        if let Err(payload) = outcome {
            tracing::error!(
                hook = self.inner.name.as_str(),
                "hook handler panicked: {}",
                panic_message(&*payload)
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "opaque panic payload"
    }
}
