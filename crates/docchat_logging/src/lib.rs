#![deny(missing_docs)]
//! Shared logging utilities for the docchat workspace.
//!
//! This crate provides the `chat_*` logging macros used across the codebase,
//! a thread-local request context that the macros prefix onto every line,
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Id of the backend request the current thread is working on, if any.
    static REQUEST_ID: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Returns the request id set for the current thread, if any.
pub fn request_context() -> Option<u64> {
    REQUEST_ID.with(|v| v.get())
}

/// Tags every log line emitted on this thread with `request_id` until the
/// returned guard is dropped. The previous context is restored on drop.
pub fn enter_request(request_id: u64) -> RequestContextGuard {
    let previous = REQUEST_ID.with(|v| v.replace(Some(request_id)));
    RequestContextGuard { previous }
}

/// Restores the previous request context when dropped.
#[must_use = "the request context is cleared as soon as the guard is dropped"]
pub struct RequestContextGuard {
    previous: Option<u64>,
}

impl Drop for RequestContextGuard {
    fn drop(&mut self) {
        REQUEST_ID.with(|v| v.set(self.previous));
    }
}

/// Emits a record at `$level`, prefixed with the current request id when set.
#[doc(hidden)]
#[macro_export]
macro_rules! __chat_emit {
    ($level:ident, $($arg:tt)*) => {{
        match $crate::request_context() {
            Some(request_id) => {
                $crate::__log::$level!("[req {}] {}", request_id, format_args!($($arg)*))
            }
            None => $crate::__log::$level!($($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! chat_trace {
    ($($arg:tt)*) => {{
        $crate::__chat_emit!(trace, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! chat_info {
    ($($arg:tt)*) => {{
        $crate::__chat_emit!(info, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! chat_debug {
    ($($arg:tt)*) => {{
        $crate::__chat_emit!(debug, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! chat_warn {
    ($($arg:tt)*) => {{
        $crate::__chat_emit!(warn, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! chat_error {
    ($($arg:tt)*) => {{
        $crate::__chat_emit!(error, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
