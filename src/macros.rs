//! Formatting macros for console calls.
//!
//! These macros format a message like `format!` and send it as a single
//! string argument to any [`Console`](crate::core::Console), including an
//! intercepted one.
//!
//! # Examples
//!
//! ```
//! use console_interceptor::prelude::*;
//! use console_interceptor::console_info;
//!
//! let console = RecordingConsole::new();
//!
//! console_info!(console, "Server started").unwrap();
//!
//! let port = 8080;
//! console_info!(console, "Server listening on port {}", port).unwrap();
//!
//! assert_eq!(console.calls()[1].text(), "Server listening on port 8080");
//! ```

/// Call `method` on a console with a formatted message.
///
/// # Examples
///
/// ```
/// # use console_interceptor::prelude::*;
/// # let console = RecordingConsole::new();
/// use console_interceptor::console_call;
/// console_call!(console, ConsoleMethod::Log, "Simple message").unwrap();
/// console_call!(console, ConsoleMethod::custom("audit"), "User {}", 42).unwrap();
/// ```
#[macro_export]
macro_rules! console_call {
    ($console:expr, $method:expr, $($arg:tt)+) => {{
        use $crate::core::Console as _;
        $console.call(
            &$method,
            &[$crate::__private::Value::String(format!($($arg)+))],
        )
    }};
}

/// Format and send to `log`.
///
/// # Examples
///
/// ```
/// # use console_interceptor::prelude::*;
/// # let console = RecordingConsole::new();
/// use console_interceptor::console_log;
/// console_log!(console, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! console_log {
    ($console:expr, $($arg:tt)+) => {
        $crate::console_call!($console, $crate::ConsoleMethod::Log, $($arg)+)
    };
}

/// Format and send to `info`.
#[macro_export]
macro_rules! console_info {
    ($console:expr, $($arg:tt)+) => {
        $crate::console_call!($console, $crate::ConsoleMethod::Info, $($arg)+)
    };
}

/// Format and send to `warn`.
///
/// # Examples
///
/// ```
/// # use console_interceptor::prelude::*;
/// # let console = RecordingConsole::new();
/// use console_interceptor::console_warn;
/// console_warn!(console, "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! console_warn {
    ($console:expr, $($arg:tt)+) => {
        $crate::console_call!($console, $crate::ConsoleMethod::Warn, $($arg)+)
    };
}

/// Format and send to `error`.
#[macro_export]
macro_rules! console_error {
    ($console:expr, $($arg:tt)+) => {
        $crate::console_call!($console, $crate::ConsoleMethod::Error, $($arg)+)
    };
}

/// Format and send to `debug`.
#[macro_export]
macro_rules! console_debug {
    ($console:expr, $($arg:tt)+) => {
        $crate::console_call!($console, $crate::ConsoleMethod::Debug, $($arg)+)
    };
}
