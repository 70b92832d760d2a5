//! Argument lists carried by hook fires.
//!
//! The original callers of an event decide how many arguments it carries and
//! what they mean; the channel itself is untyped. [`HookArgs`] models that as
//! an immutable, positionally indexed list of JSON values. Cloning is cheap
//! (the list is behind an [`Arc`]), which is what makes memoizing and
//! replaying the last fire inexpensive.
//!
//! Build argument lists with the [`hook_args!`](crate::hook_args) macro:
//!
//! ```
//! use tocsin_hooks::hook_args;
//!
//! let args = hook_args!["saved", 3];
//! assert_eq!(args.len(), 2);
//! assert_eq!(args.arg::<String>(0).unwrap(), "saved");
//! assert_eq!(args.arg::<u32>(1).unwrap(), 3);
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// HookArgs
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable argument list passed to [`Hook::fire`](crate::hook::Hook::fire)
/// and handed to every handler.
///
/// Arguments are positional. Handlers that expect typed data decode it with
/// [`arg`](Self::arg); handlers that only care that the event happened can
/// ignore the list entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct HookArgs {
    values: Arc<[Value]>,
}

impl HookArgs {
    /// An empty argument list, for events that carry no data.
    #[must_use]
    pub fn none() -> Self {
        Self {
            values: Arc::from(Vec::new()),
        }
    }

    /// Creates an argument list from already-encoded values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: Arc::from(values),
        }
    }

    /// Returns the raw value at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Decodes the value at `index` into `T`.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Missing`] if fewer than `index + 1` arguments were
    /// fired, [`PayloadError::Decode`] if the value does not deserialize
    /// into `T`.
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> Result<T, PayloadError> {
        let value = self.values.get(index).ok_or(PayloadError::Missing {
            index,
            len: self.values.len(),
        })?;
        serde_json::from_value(value.clone())
            .map_err(|source| PayloadError::Decode { index, source })
    }

    /// Number of arguments in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the raw values in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// The full list as a slice of raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

impl Default for HookArgs {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for HookArgs {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl From<Value> for HookArgs {
    /// A single-argument list, the common case for typed channels.
    fn from(value: Value) -> Self {
        Self::new(vec![value])
    }
}

impl FromIterator<Value> for HookArgs {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Builds a [`HookArgs`] list from any values accepted by `serde_json::json!`.
///
/// # Example
///
/// ```
/// use tocsin_hooks::hook_args;
///
/// let empty = hook_args![];
/// let args = hook_args![1, "two", { "three": 3 }];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! hook_args {
    () => {
        $crate::args::HookArgs::none()
    };
    ($($arg:tt),+ $(,)?) => {
        $crate::args::HookArgs::new(::std::vec![
            $($crate::__serde_json::json!($arg)),+
        ])
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// PayloadError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced when encoding or decoding typed hook payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The requested positional argument was not fired.
    #[error("hook argument {index} is missing ({len} arguments were fired)")]
    Missing {
        /// Index that was requested.
        index: usize,
        /// Number of arguments actually fired.
        len: usize,
    },

    /// The argument exists but does not deserialize into the requested type.
    #[error("hook argument {index} could not be decoded")]
    Decode {
        /// Index that was requested.
        index: usize,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// A typed payload could not be serialized for firing.
    #[error("payload for hook '{hook}' could not be encoded")]
    Encode {
        /// Name of the hook being fired.
        hook: String,
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_macro_invocation_produces_no_args() {
        let args = hook_args![];
        assert!(args.is_empty());
        assert_eq!(args, HookArgs::none());
    }

    #[test]
    fn macro_encodes_each_argument_in_order() {
        let args = hook_args![1, "two", { "three": 3 }];
        assert_eq!(args.len(), 3);
        assert_eq!(args.get(0), Some(&json!(1)));
        assert_eq!(args.get(1), Some(&json!("two")));
        assert_eq!(args.get(2), Some(&json!({ "three": 3 })));
    }

    #[test]
    fn arg_decodes_positionally() {
        let args = hook_args!["title", 42];
        assert_eq!(args.arg::<String>(0).unwrap(), "title");
        assert_eq!(args.arg::<u64>(1).unwrap(), 42);
    }

    #[test]
    fn arg_out_of_range_reports_missing() {
        let args = hook_args![true];
        match args.arg::<bool>(3) {
            Err(PayloadError::Missing { index: 3, len: 1 }) => {}
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn arg_type_mismatch_reports_decode() {
        let args = hook_args!["not a number"];
        match args.arg::<u32>(0) {
            Err(PayloadError::Decode { index: 0, .. }) => {}
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn clones_share_the_same_values() {
        let args = hook_args![1, 2];
        let clone = args.clone();
        assert_eq!(args, clone);
        assert_eq!(clone.as_slice(), &[json!(1), json!(2)]);
    }
}
