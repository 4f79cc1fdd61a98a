//! Logging macros that cost nothing unless the `tracing` feature is enabled.
//!
//! With the feature on they forward to the `tracing` crate, so the usual
//! subscriber setup applies:
//!
//! ```bash
//! RUST_LOG=avltree=trace cargo test --features tracing
//! ```
//!
//! Without it they expand to nothing and their arguments are never evaluated.

#![allow(unused_macros)]

/// Trace-level logging (rotations).
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level logging (rejected or ineffective operations).
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
