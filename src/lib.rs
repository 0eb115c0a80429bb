//! # Console Interceptor
//!
//! Route every console call through your own handlers before it reaches the
//! original console.
//!
//! ## Features
//!
//! - **Swappable Console**: enable/disable interception on an injectable
//!   [`ConsoleContext`] or on the process-wide [`global`] context
//! - **Typed Decisions**: handlers suppress, pass through, replace or
//!   redirect each call
//! - **Async Handlers**: deferred replies resolve in the background with a
//!   timeout, never blocking the call site
//! - **Graceful Recovery**: handler failures are absorbed; the original
//!   message still gets logged

pub mod consoles;
pub mod core;
pub mod global;
pub mod macros;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}

pub mod prelude {
    pub use crate::consoles::{ConsoleCall, RecordingConsole, StdConsole};
    pub use crate::core::{
        async_handler, handler, AsyncHandler, Console, ConsoleContext, ConsoleMethod, Decision,
        DisableHandle, ErrorCallback, Handler, HandlerError, HandlerExtra, HandlerResult,
        InterceptOptions, InterceptOptionsBuilder, InterceptorError, InterceptorMetrics,
        Invocation, Recovery, RegistrationMode, Reply, Result, DEFAULT_HANDLER_TIMEOUT,
    };
}

pub use consoles::{ConsoleCall, RecordingConsole, StdConsole};
pub use core::{
    async_handler, handler, normalize_arguments, AsyncHandler, Console, ConsoleContext,
    ConsoleMethod, Decision, DisableHandle, ErrorCallback, Handler, HandlerError, HandlerExtra,
    HandlerResult, InterceptOptions, InterceptOptionsBuilder, InterceptingConsole,
    InterceptorError, InterceptorMetrics, Invocation, Recovery, RegistrationMode, Reply, Result,
    DEFAULT_HANDLER_TIMEOUT,
};
pub use global::{disable, enable};
