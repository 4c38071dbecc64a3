//! Logging macros for the CPM engine with verbosity level control.
//!
//! Nothing is formatted when logging is disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (only invariant violations)
//! - 1: SUMMARY (project size, makespan, critical activity count)
//! - 2: PASSES (per-activity forward/backward pass results)
//! - 3: DEBUG (topological order, chain enumeration internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_PASSES: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
///
/// Used for: one line per computation describing its outcome.
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!($($arg)*);
        }
    };
}

/// Log at PASSES level (verbosity >= 2).
///
/// Used for: ES/EF and LS/LF values as each pass settles them.
#[macro_export]
macro_rules! log_passes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PASSES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

/// Report an internal invariant violation. Always printed.
#[macro_export]
macro_rules! log_invariant {
    ($($arg:tt)*) => {
        eprintln!("cpm: invariant violation: {}", format_args!($($arg)*));
    };
}
