//! Shared test utilities for `tocsin_hooks` integration tests.
//!
//! This module provides common recorders and handler factories used across
//! multiple test files. Import via `mod test_utils;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test utilities — not all items used in every test binary"
)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tocsin_hooks::{Handler, HookArgs};

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Shared, ordered log of handler invocations.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Creates an empty call log.
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Drains the log into a plain vector for assertions.
pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ═══════════════════════════════════════════════════════════════════════════════
// HANDLER FACTORIES
// ═══════════════════════════════════════════════════════════════════════════════

/// A handler that appends `label` to the log on each invocation.
pub fn labeled(log: &CallLog, label: &str) -> Handler {
    let log = Arc::clone(log);
    let label = label.to_owned();
    Handler::new(move |_| log.lock().unwrap().push(label.clone()))
}

/// A handler that appends `label(a, b, ..)` with the raw fired arguments.
pub fn recording(log: &CallLog, label: &str) -> Handler {
    let log = Arc::clone(log);
    let label = label.to_owned();
    Handler::new(move |args: &HookArgs| {
        let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
        log.lock()
            .unwrap()
            .push(format!("{}({})", label, rendered.join(", ")));
    })
}

/// A handler that increments `counter` on each invocation.
pub fn counting(counter: &Arc<AtomicUsize>) -> Handler {
    let counter = Arc::clone(counter);
    Handler::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

/// A counter plus its counting handler, in one call.
pub fn counter_pair() -> (Arc<AtomicUsize>, Handler) {
    let counter = Arc::new(AtomicUsize::new(0));
    let handler = counting(&counter);
    (counter, handler)
}
