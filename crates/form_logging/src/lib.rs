#![deny(missing_docs)]
//! Shared logging utilities for the contact form workspace.
//!
//! This crate provides the `form_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! Every macro accepts an optional `attempt = <id>;` prefix which tags the
//! line with the submission attempt it belongs to:
//!
//! ```ignore
//! form_info!(attempt = 3; "response received ({} bytes)", len);
//! form_warn!("config file missing, using defaults");
//! ```
//!
//! Field values typed by the user are never passed to these macros; log
//! field names and counts instead.

#[doc(hidden)]
pub use log;

/// Log target shared by every `form_*` macro.
pub const TARGET: &str = "contact_form";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! form_trace {
    (attempt = $attempt:expr; $($arg:tt)+) => {{
        $crate::log::trace!(target: $crate::TARGET, "[attempt #{}] {}", $attempt, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::trace!(target: $crate::TARGET, $($arg)+);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! form_debug {
    (attempt = $attempt:expr; $($arg:tt)+) => {{
        $crate::log::debug!(target: $crate::TARGET, "[attempt #{}] {}", $attempt, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::debug!(target: $crate::TARGET, $($arg)+);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! form_info {
    (attempt = $attempt:expr; $($arg:tt)+) => {{
        $crate::log::info!(target: $crate::TARGET, "[attempt #{}] {}", $attempt, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::info!(target: $crate::TARGET, $($arg)+);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! form_warn {
    (attempt = $attempt:expr; $($arg:tt)+) => {{
        $crate::log::warn!(target: $crate::TARGET, "[attempt #{}] {}", $attempt, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::warn!(target: $crate::TARGET, $($arg)+);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! form_error {
    (attempt = $attempt:expr; $($arg:tt)+) => {{
        $crate::log::error!(target: $crate::TARGET, "[attempt #{}] {}", $attempt, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::error!(target: $crate::TARGET, $($arg)+);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have won the race to install the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
