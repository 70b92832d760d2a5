//! Error reporting through `error.*` topic hooks.
//!
//! Collaborators that want to surface a runtime error without deciding what
//! happens to it hand it to an [`ErrorReporter`]. The reporter fires the
//! error's topic hook (`error.caught` by default, `error.<component>` by
//! convention) with a structured payload, so anything from a debug toolbar
//! to a remote collector can subscribe. Every report is also emitted on the
//! logging side channel, so an error is never silently dropped even when no
//! subscriber exists.

use std::error::Error;

use serde_json::json;

use crate::registry::HookRegistry;

/// Topic fired by [`ErrorReporter::report`].
pub const DEFAULT_ERROR_TOPIC: &str = "error.caught";

// ─────────────────────────────────────────────────────────────────────────────
// ErrorReporter
// ─────────────────────────────────────────────────────────────────────────────

/// Reports errors by firing their topic hook.
///
/// The fired payload is a single structured argument:
///
/// ```json
/// { "topic": "error.caught", "message": "...", "chain": ["...", "..."] }
/// ```
///
/// where `chain` is the stringified [`source`](Error::source) chain, outermost
/// first. Because topics are ordinary hooks, late subscribers are replayed
/// the most recent report.
///
/// # Example
///
/// ```
/// use tocsin_hooks::{ErrorReporter, HookRegistry};
///
/// let registry = HookRegistry::new();
/// let reporter = ErrorReporter::new(registry.clone());
///
/// registry.hook("error.caught").observe(|args| {
///     let message: String = args.get(0).unwrap()["message"]
///         .as_str()
///         .unwrap()
///         .to_owned();
///     assert_eq!(message, "boom");
/// });
///
/// let error = std::io::Error::other("boom");
/// reporter.report(&error);
/// ```
#[derive(Clone)]
pub struct ErrorReporter {
    hooks: HookRegistry,
}

impl ErrorReporter {
    /// Creates a reporter firing into `hooks`.
    #[must_use]
    pub fn new(hooks: HookRegistry) -> Self {
        Self { hooks }
    }

    /// Reports `error` on the default topic, [`DEFAULT_ERROR_TOPIC`].
    pub fn report(&self, error: &dyn Error) {
        self.report_to(DEFAULT_ERROR_TOPIC, error);
    }

    /// Reports `error` on `topic`, conventionally `error.<component>`.
    pub fn report_to(&self, topic: &str, error: &dyn Error) {
        let chain = source_chain(error);
        tracing::error!(topic, error = %error, "error reported");
        self.hooks.hook(topic).fire(json!({
            "topic": topic,
            "message": error.to_string(),
            "chain": chain,
        }));
    }
}

/// Stringifies the full source chain of `error`, outermost first.
fn source_chain(error: &dyn Error) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    let mut current = error.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }
    chain
}
