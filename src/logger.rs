//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output gated behind `--verbose`
//! - `status_*` helpers for step results (success, warning, error)
//!
//! # Example
//!
//! ```ignore
//! log!("icons"; "generating {} densities", count);
//! status_success("icons", "adaptive icons generated");
//! status_error("patch", "strings.xml", "permission denied");
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "icons" => prefix.bright_blue().bold().to_string(),
        "copy" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Step Status
// ============================================================================

/// Step succeeded (✓ prefix, green).
pub fn status_success(module: &str, message: &str) {
    log(module, &format!("{} {message}", "✓".green()));
}

/// Step skipped or degraded (⚠ prefix, yellow).
pub fn status_warning(module: &str, message: &str) {
    log(module, &format!("{} {message}", "⚠".yellow()));
}

/// Step failed (✗ prefix, red) with optional detail on following lines.
pub fn status_error(module: &str, summary: &str, detail: &str) {
    log(module, &format_error(summary, detail));
}

fn format_error(summary: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("{} {summary}", "✗".red())
    } else {
        format!("{} {summary}\n{detail}", "✗".red())
    }
}

// ============================================================================
// Tests
// ============================================================================
