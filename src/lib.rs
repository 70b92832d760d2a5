//! Named event hook registry with memoized replay for late subscribers.
//!

pub use tocsin_hooks::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use tocsin_hooks::prelude::*;
}
