//! Logging macros for ergonomic message formatting.
//!
//! `values!` builds the operand slice taken by [`Printer::print`] and
//! [`Printer::println`]; the level macros are printf-style shorthands over a
//! [`Logger`].
//!
//! [`Printer::print`]: crate::Printer::print
//! [`Printer::println`]: crate::Printer::println
//! [`Logger`]: crate::Logger
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::{info, StdLogger};
//!
//! let logger = StdLogger::with_default_output("server");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Build a `&[Value]` from heterogeneous operands.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{values, Value};
///
/// let operands: &[Value] = values![1, "abc", true];
/// assert_eq!(operands.len(), 3);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        &[] as &[$crate::Value]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::Value::from($arg)),+] as &[$crate::Value]
    };
}

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::{Level, StdLogger};
/// # let logger = StdLogger::with_default_output("app");
/// use rust_log_facade::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::{Logger as _, Printer as _};
        $logger
            .at_level(::core::option::Option::None, $level)
            .printf(format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}
