//! Process-wide console context
//!
//! The global context is created lazily on first use with a [`StdConsole`]
//! as its original console, or explicitly with [`install`] before anything
//! touches it. Once created it lives for the rest of the process.
//!
//! # Example
//!
//! ```no_run
//! use console_interceptor::{global, prelude::*};
//! use serde_json::json;
//!
//! global::enable(
//!     handler(|call, _| Ok(Decision::forward(format!("[app] {}", call.arguments.len())).into())),
//!     InterceptOptions::default(),
//! )?;
//!
//! global::console().log(&[json!("hello")])?;
//! global::disable();
//! # Ok::<(), console_interceptor::InterceptorError>(())
//! ```

use crate::consoles::StdConsole;
use crate::core::{
    Console, ConsoleContext, DisableHandle, Handler, InterceptOptions, InterceptorError, Result,
};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<ConsoleContext> = OnceLock::new();

/// Create the global context around `original`
///
/// Fails with [`InterceptorError::AlreadyInitialized`] if the global context
/// already exists, in which case `original` is dropped.
pub fn install(original: Arc<dyn Console>) -> Result<&'static ConsoleContext> {
    let mut created = false;
    let context = GLOBAL.get_or_init(|| {
        created = true;
        ConsoleContext::new(original)
    });

    if created {
        Ok(context)
    } else {
        Err(InterceptorError::AlreadyInitialized)
    }
}

/// The global context, creating it on first use
pub fn context() -> &'static ConsoleContext {
    GLOBAL.get_or_init(|| ConsoleContext::new(Arc::new(StdConsole::new())))
}

/// The currently active global console
pub fn console() -> Arc<dyn Console> {
    context().console()
}

/// Intercept the global console
pub fn enable(
    handler: Arc<dyn Handler>,
    options: impl Into<InterceptOptions>,
) -> Result<DisableHandle> {
    context().enable(handler, options)
}

/// Restore the original global console
pub fn disable() {
    context().disable();
}

pub fn is_enabled() -> bool {
    context().is_enabled()
}
