//! Named event hook channels for Tocsin.
//!
//! `tocsin_hooks` provides a process-wide registry of independent, named
//! event channels ([`Hook`]s). Code paths announce state changes by firing a
//! hook; other code reacts by adding handlers to it. The two sides never need
//! to know about each other, only about the event name.
//!
//! The same event can be fired multiple times, and the last fire of every
//! hook is memoized: a handler added after a fire is invoked right away with
//! the most recent event data. This makes registration order irrelevant for
//! "ready"-style events, much like a deferred that has already resolved.
//!
//! # Core Concepts
//!
//! - [`HookRegistry`] - Name-keyed store of channels, created lazily
//! - [`Hook`] - One channel: ordered handlers plus memoized last fire
//! - [`Handler`] - Reference-counted callable token, removable by identity
//! - [`HookArgs`] - Immutable argument list carried by a fire
//! - [`TypedHook`] - Statically typed view over a dynamic channel
//! - [`ErrorReporter`] - Reports errors through `error.*` topic hooks
//!
//! # Example
//!
//! ```
//! use tocsin_hooks::{HookRegistry, hook_args};
//!
//! let registry = HookRegistry::new();
//!
//! registry.hook("page.content").fire(hook_args!["<p>hello</p>"]);
//!
//! // Added after the fire, yet invoked immediately with the memoized data.
//! registry.hook("page.content").observe(|args| {
//!     let html: String = args.arg(0).unwrap();
//!     assert_eq!(html, "<p>hello</p>");
//! });
//! ```
//!
//! # Detachable and chainable
//!
//! `add`, `remove`, and `fire` all return `&Hook`, so calls chain. A [`Hook`]
//! is a cheap clonable handle; pass it (or just a closure capturing it) to
//! code that should fire or observe the event without knowing its name.

/// Argument lists carried by hook fires.
pub mod args;

/// Reference-counted handler tokens.
pub mod handler;

/// A single named event channel.
pub mod hook;

/// The name-keyed channel registry.
pub mod registry;

/// Error reporting through `error.*` topic hooks.
pub mod report;

/// Statically typed views over dynamic channels.
pub mod typed;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::args::{HookArgs, PayloadError};
    pub use crate::handler::Handler;
    pub use crate::hook::Hook;
    pub use crate::hook_args;
    pub use crate::registry::HookRegistry;
    pub use crate::report::{DEFAULT_ERROR_TOPIC, ErrorReporter};
    pub use crate::typed::TypedHook;
}

// Re-export for `hook_args!` expansion; not part of the public API.
#[doc(hidden)]
pub use serde_json as __serde_json;

// Re-export key types at crate root for convenience
pub use args::{HookArgs, PayloadError};
pub use handler::Handler;
pub use hook::Hook;
pub use registry::HookRegistry;
pub use report::{DEFAULT_ERROR_TOPIC, ErrorReporter};
pub use typed::TypedHook;
