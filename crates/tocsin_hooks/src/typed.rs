//! Statically typed views over dynamic channels.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::args::{HookArgs, PayloadError};
use crate::handler::Handler;
use crate::hook::Hook;

// ─────────────────────────────────────────────────────────────────────────────
// TypedHook
// ─────────────────────────────────────────────────────────────────────────────

/// A statically typed view of a [`Hook`], firing and observing a single
/// payload of type `T`.
///
/// The underlying channel stays dynamic: the payload is encoded to the
/// channel's argument list on fire and decoded back on delivery, so typed and
/// untyped users of one name interoperate. The view is a convention, not an
/// enforcement: if a fired payload does not decode as `T`, the typed
/// observer skips it with a WARN log rather than failing the fire.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tocsin_hooks::HookRegistry;
///
/// #[derive(Serialize, Deserialize)]
/// struct Saved {
///     revision: u64,
/// }
///
/// let registry = HookRegistry::new();
/// let saved = registry.typed::<Saved>("page.saved");
///
/// saved.observe(|payload| assert_eq!(payload.revision, 7));
/// saved.fire(&Saved { revision: 7 }).unwrap();
/// ```
pub struct TypedHook<T> {
    hook: Hook,
    _payload: PhantomData<fn(T)>,
}

impl<T> TypedHook<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(hook: Hook) -> Self {
        Self {
            hook,
            _payload: PhantomData,
        }
    }

    /// The event name of the underlying channel.
    #[must_use]
    pub fn name(&self) -> &str {
        self.hook.name()
    }

    /// The untyped channel behind this view.
    #[must_use]
    pub fn hook(&self) -> &Hook {
        &self.hook
    }

    /// Fires the event with `payload` as the single argument.
    ///
    /// Memoization and ordering are those of [`Hook::fire`].
    ///
    /// # Errors
    ///
    /// [`PayloadError::Encode`] if `payload` does not serialize; nothing is
    /// fired and the memo is untouched in that case.
    pub fn fire(&self, payload: &T) -> Result<&Self, PayloadError> {
        let value = serde_json::to_value(payload).map_err(|source| PayloadError::Encode {
            hook: self.hook.name().to_owned(),
            source,
        })?;
        self.hook.fire(HookArgs::from(value));
        Ok(self)
    }

    /// Registers a typed handler and returns its token.
    ///
    /// The handler receives the decoded first argument of each fire. Replay
    /// semantics are those of [`Hook::add`]. Fires whose first argument does
    /// not decode as `T` are skipped with a WARN log.
    pub fn observe(&self, callable: impl Fn(T) + Send + Sync + 'static) -> Handler {
        let name = self.hook.name().to_owned();
        self.hook.observe(move |args: &HookArgs| match args.arg::<T>(0) {
            Ok(payload) => callable(payload),
            Err(error) => {
                tracing::warn!(
                    hook = name.as_str(),
                    error = %error,
                    "typed observer skipped a payload it cannot decode"
                );
            }
        })
    }

    /// Detaches a handler previously returned by [`observe`](Self::observe).
    pub fn remove(&self, handler: &Handler) -> &Self {
        self.hook.remove(handler);
        self
    }
}

impl<T> Clone for TypedHook<T> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook.clone(),
            _payload: PhantomData,
        }
    }
}
