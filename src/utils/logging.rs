//! Module-gated logging macros.
//!
//! Each module that uses them defines two constants:
//! ```rust,ignore
//! const ENABLE_LOGS: bool = true;
//! const LOG_TARGET: &str = "railwatch::sync";
//! ```
//! The macros are exported at the crate root, so callers import them with
//! `use crate::{log_debug, log_info, log_warn, log_error};`.
//!
//! Setting `ENABLE_LOGS` to `false` silences a module without touching the
//! global `RUST_LOG` filter; `LOG_TARGET` lets that filter address the module
//! by a stable name independent of the file layout.

/// Debug-level log line for the calling module.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Info-level log line for the calling module.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Warn-level log line for the calling module.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!(target: LOG_TARGET, $($arg)*);
        }
    };
}

/// Error-level log line for the calling module.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!(target: LOG_TARGET, $($arg)*);
        }
    };
}
