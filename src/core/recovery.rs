//! Error recovery for failed interception
//!
//! When a handler errors, panics, times out, or forwarding fails, the
//! original message must still reach the original console unless a custom
//! `on_error` callback decides otherwise. The default sequence is:
//!
//! 1. log the wrapped error through the original console's `error`
//! 2. restore the original console
//! 3. replay the original call

use super::{
    console::Console,
    context::DisableHandle,
    error::{InterceptorError, Result},
    method::ConsoleMethod,
    metrics::InterceptorMetrics,
    options::ErrorCallback,
};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Call the console, turning a panicking sink into a console error
pub(crate) fn call_isolated(
    console: &dyn Console,
    method: &ConsoleMethod,
    arguments: &[Value],
) -> Result<()> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| console.call(method, arguments)))
        .unwrap_or_else(|panic_info| {
            Err(InterceptorError::console(
                method.clone(),
                format!("console panicked: {}", panic_message(&*panic_info)),
            ))
        })
}

/// Everything recovery needs from the interceptor that failed
#[derive(Clone)]
pub(crate) struct RecoveryScope {
    pub(crate) console: Arc<dyn Console>,
    pub(crate) disable: DisableHandle,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) metrics: Arc<InterceptorMetrics>,
}

/// Recovery actions handed to a custom `on_error` callback
///
/// The callback may call any combination of these, or none.
pub struct Recovery {
    error: InterceptorError,
    method: ConsoleMethod,
    arguments: Vec<Value>,
    scope: RecoveryScope,
}

impl Recovery {
    /// Method of the failed call
    pub fn method(&self) -> &ConsoleMethod {
        &self.method
    }

    /// Arguments of the failed call, as originally passed
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The wrapped error
    pub fn error(&self) -> &InterceptorError {
        &self.error
    }

    /// The original, un-intercepted console
    pub fn console(&self) -> &Arc<dyn Console> {
        &self.scope.console
    }

    /// Replay the original call on the original console
    pub fn log(&self) {
        if let Err(e) = call_isolated(&*self.scope.console, &self.method, &self.arguments) {
            eprintln!(
                "[INTERCEPTOR ERROR] Replaying '{}' on console '{}' failed: {}",
                self.method,
                self.scope.console.name(),
                e
            );
        }
    }

    /// Log the wrapped error through the original console's `error`
    pub fn log_error(&self) {
        let rendered = [Value::String(self.error.to_string())];
        if let Err(e) = call_isolated(&*self.scope.console, &ConsoleMethod::Error, &rendered) {
            eprintln!(
                "[INTERCEPTOR ERROR] Could not report '{}' on console '{}': {}",
                self.error,
                self.scope.console.name(),
                e
            );
        }
    }

    /// Restore the original console
    pub fn disable(&self) {
        self.scope.disable.disable();
    }

    /// Run the default recovery, as if no callback had been supplied
    pub fn on_error(&self) {
        self.scope.metrics.record_recovery();
        self.log_error();
        self.disable();
        self.log();
    }
}

/// Route a failure to the custom callback or the default sequence
pub(crate) fn recover(
    error: InterceptorError,
    method: ConsoleMethod,
    arguments: Vec<Value>,
    scope: RecoveryScope,
) {
    let callback = scope.on_error.clone();
    let recovery = Recovery {
        error,
        method,
        arguments,
        scope,
    };

    let Some(callback) = callback else {
        recovery.on_error();
        return;
    };

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        callback(&recovery.error, &recovery)
    }));

    if let Err(panic_info) = outcome {
        eprintln!(
            "[INTERCEPTOR CRITICAL] on_error callback panicked while handling '{}': {}",
            recovery.error,
            panic_message(&*panic_info)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consoles::RecordingConsole;
    use parking_lot::Mutex;
    use serde_json::json;

    fn scope(console: &RecordingConsole, on_error: Option<ErrorCallback>) -> RecoveryScope {
        RecoveryScope {
            console: Arc::new(console.clone()),
            disable: DisableHandle::detached(),
            on_error,
            metrics: Arc::new(InterceptorMetrics::new()),
        }
    }

    #[test]
    fn test_default_sequence() {
        let console = RecordingConsole::new();
        let scope = scope(&console, None);
        let metrics = Arc::clone(&scope.metrics);

        recover(
            InterceptorError::intercepted(ConsoleMethod::Warn, vec![json!("hello")], "bad handler"),
            ConsoleMethod::Warn,
            vec![json!("hello")],
            scope,
        );

        let calls = console.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, ConsoleMethod::Error);
        assert_eq!(
            calls[0].arguments,
            vec![json!("ConsoleInterceptorError: bad handler")]
        );
        assert_eq!(calls[1].method, ConsoleMethod::Warn);
        assert_eq!(calls[1].arguments, vec![json!("hello")]);
        assert_eq!(metrics.recoveries(), 1);
    }

    #[test]
    fn test_custom_callback_has_discretion() {
        let console = RecordingConsole::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let callback: ErrorCallback = Arc::new(move |error: &InterceptorError, recovery: &Recovery| {
            seen_clone.lock().push(error.to_string());
            assert_eq!(recovery.method(), &ConsoleMethod::Log);
            recovery.log();
        });

        recover(
            InterceptorError::intercepted(ConsoleMethod::Log, vec![json!(1)], "nope"),
            ConsoleMethod::Log,
            vec![json!(1)],
            scope(&console, Some(callback)),
        );

        assert_eq!(seen.lock().as_slice(), ["ConsoleInterceptorError: nope"]);
        let calls = console.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ConsoleMethod::Log);
    }

    #[test]
    fn test_callback_can_request_default() {
        let console = RecordingConsole::new();
        let callback: ErrorCallback =
            Arc::new(|_: &InterceptorError, recovery: &Recovery| recovery.on_error());

        recover(
            InterceptorError::intercepted(ConsoleMethod::Info, vec![], "x"),
            ConsoleMethod::Info,
            vec![json!("m")],
            scope(&console, Some(callback)),
        );

        let methods: Vec<_> = console.calls().into_iter().map(|c| c.method).collect();
        assert_eq!(methods, vec![ConsoleMethod::Error, ConsoleMethod::Info]);
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let console = RecordingConsole::new();
        let callback: ErrorCallback =
            Arc::new(|_: &InterceptorError, _: &Recovery| panic!("callback blew up"));

        recover(
            InterceptorError::intercepted(ConsoleMethod::Log, vec![], "x"),
            ConsoleMethod::Log,
            vec![],
            scope(&console, Some(callback)),
        );

        assert!(console.calls().is_empty());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(&*payload), "static str");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(&*payload), "Unknown panic");
    }
}
