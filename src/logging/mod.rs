//! # Logging Module
//!
//! This module provides logging utilities for license-header, including:
//! - Structured diagnostics through `tracing`, initialized by [`init_tracing`]
//! - Verbose logging that can be enabled/disabled
//! - The process-wide color mode
//!
//! Diagnostics go to stderr so that stdout carries only the per-file status
//! lines.
//!
//! ## Example
//!
//! ```rust
//! use license_header::logging::{ColorMode, set_verbose};
//! use license_header::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Processing file: {}", "index.ts");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, level_for, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}
