//! The name-keyed channel registry.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::hook::Hook;
use crate::typed::TypedHook;

// ─────────────────────────────────────────────────────────────────────────────
// HookRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Process-wide store mapping event names to [`Hook`] channels.
///
/// Channels are created lazily on first lookup and live as long as the
/// registry. Any string is a valid, distinct name: matching is exact and
/// case-sensitive, and the empty string is a name like any other.
///
/// `HookRegistry` is a cheap clonable handle: clones observe the same
/// mapping, so one registry instance can be owned by the application root
/// and handed to every collaborator. There is no implicit global instance.
///
/// # Example
///
/// ```
/// use tocsin_hooks::{HookRegistry, hook_args};
///
/// let registry = HookRegistry::new();
/// let content = registry.hook("page.content");
///
/// content.observe(|args| {
///     let html: String = args.arg(0).unwrap();
///     assert!(html.contains("hello"));
/// });
/// content.fire(hook_args!["<p>hello</p>"]);
/// ```
#[derive(Clone, Default)]
pub struct HookRegistry {
    channels: Arc<RwLock<HashMap<String, Hook>>>,
}

impl HookRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the channel for `name`, creating it on first use.
    ///
    /// Repeated calls with equal names return handles to the same channel,
    /// so handlers added through one handle are fired through any other.
    /// This operation cannot fail.
    #[must_use]
    pub fn hook(&self, name: &str) -> Hook {
        if let Some(hook) = self.channels.read().get(name) {
            return hook.clone();
        }
        let mut channels = self.channels.write();
        channels
            .entry_ref(name)
            .or_insert_with(|| {
                tracing::debug!(hook = name, "hook channel created");
                Hook::new(name)
            })
            .clone()
    }

    /// Returns a statically typed view of the channel for `name`.
    ///
    /// The view is a convention, not an enforcement: different callers may
    /// view the same name at different types. See [`TypedHook`].
    #[must_use]
    pub fn typed<T>(&self, name: &str) -> TypedHook<T>
    where
        T: Serialize + DeserializeOwned,
    {
        TypedHook::new(self.hook(name))
    }

    /// Whether a channel has been created for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.channels.read().contains_key(name)
    }

    /// Number of channels created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    /// Whether no channel has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }

    /// Names of all channels created so far, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.channels.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook_args;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn repeated_lookups_return_the_same_channel() {
        let registry = HookRegistry::new();
        let first = registry.hook("a.b");
        let second = registry.hook("a.b");
        assert!(first.same_channel(&second));
    }

    #[test]
    fn distinct_names_get_distinct_channels() {
        let registry = HookRegistry::new();
        assert!(!registry.hook("a").same_channel(&registry.hook("b")));
        assert!(!registry.hook("a").same_channel(&registry.hook("A")));
    }

    #[test]
    fn empty_string_is_a_valid_name() {
        let registry = HookRegistry::new();
        let hook = registry.hook("");
        assert!(hook.same_channel(&registry.hook("")));
        assert_eq!(hook.name(), "");
    }

    #[test]
    fn channels_appear_on_first_lookup() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("late.event"));

        let _ = registry.hook("late.event");
        assert!(registry.contains("late.event"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["late.event".to_string()]);
    }

    #[test]
    fn registry_clones_share_state() {
        let registry = HookRegistry::new();
        let clone = registry.clone();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        registry.hook("shared").observe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        clone.hook("shared").fire(hook_args![]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
