//! Core interceptor types and traits

pub mod console;
pub mod context;
pub mod decision;
pub mod error;
pub mod handler;
pub mod interceptor;
pub mod method;
pub mod metrics;
pub mod options;
pub mod recovery;
mod scheduler;

pub use console::Console;
pub use context::{ConsoleContext, DisableHandle};
pub use decision::{normalize_arguments, Decision};
pub use error::{HandlerError, InterceptorError, Result};
pub use handler::{
    async_handler, handler, AsyncHandler, BoxFuture, Deferred, Handler, HandlerExtra,
    HandlerResult, Invocation, Reply,
};
pub use interceptor::InterceptingConsole;
pub use method::ConsoleMethod;
pub use metrics::InterceptorMetrics;
pub use options::{
    ErrorCallback, InterceptOptions, InterceptOptionsBuilder, RegistrationMode,
    DEFAULT_HANDLER_TIMEOUT,
};
pub use recovery::Recovery;
