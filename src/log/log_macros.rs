//! Leveled logging macros that stamp the call site (`file!()`/`line!()`).
//!
//! # Feature Flags
//! Level shortcuts are controlled by cargo features:
//! `log-debug`, `log-info`, `log-warning`, `log-error`, `log-fatal`.
//! Each feature enables every level above it; the default is `log-debug`.
//!
//! If a feature is disabled, the corresponding macro expands to `()`, removing
//! formatting and allocation at compile time. Runtime thresholds still apply
//! to everything that is compiled in.

// ============================================================================
// 1. GENERIC MACROS
// ============================================================================

/// Writes a formatted message with the current file and line to `logger`.
///
/// `logger` may be any value whose method lookup finds [`Logger`](crate::log::Logger)
/// (a logger, a reference to one, or an `Arc`).
#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $prio:expr, $($arg:tt)*) => {{
        use $crate::log::Logger as _;
        $logger.write($crate::log::Message::with_source(
            format!($($arg)*),
            $prio,
            file!(),
            Some(line!()),
        ));
    }};
}

/// Writes a formatted message with the current file and line through the
/// process-wide facade. A no-op when no logger is installed.
#[macro_export]
macro_rules! global_log {
    ($prio:expr, $($arg:tt)*) => {{
        $crate::log::write($crate::log::Message::with_source(
            format!($($arg)*),
            $prio,
            file!(),
            Some(line!()),
        ));
    }};
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! global_debug { ($($arg:tt)*) => { $crate::global_log!($crate::log::Priority::Debug, $($arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! global_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! global_info { ($($arg:tt)*) => { $crate::global_log!($crate::log::Priority::Info, $($arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! global_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARNING ----------------------
#[cfg(feature = "log-warning")]
#[macro_export]
macro_rules! global_warning { ($($arg:tt)*) => { $crate::global_log!($crate::log::Priority::Warning, $($arg)*) } }

#[cfg(not(feature = "log-warning"))]
#[macro_export]
macro_rules! global_warning {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR ----------------------
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! global_error { ($($arg:tt)*) => { $crate::global_log!($crate::log::Priority::Error, $($arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! global_error {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- FATAL ----------------------
// Generally always enabled, but consistent structure allows disabling it too.
#[cfg(feature = "log-fatal")]
#[macro_export]
macro_rules! global_fatal { ($($arg:tt)*) => { $crate::global_log!($crate::log::Priority::Fatal, $($arg)*) } }

#[cfg(not(feature = "log-fatal"))]
#[macro_export]
macro_rules! global_fatal {
    ($($arg:tt)*) => {
        ()
    };
}
