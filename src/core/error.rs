//! Error types for the console interceptor

use super::method::ConsoleMethod;
use serde_json::Value;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, InterceptorError>;

/// Boxed error a handler may return instead of a decision
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum InterceptorError {
    /// The handler is already installed on this context
    #[error("This handler is already registered")]
    HandlerAlreadyRegistered,

    /// Single-handler mode only admits one handler at a time
    #[error("Console interception is already enabled with another handler")]
    AlreadyEnabled,

    /// The process-wide context was created before `install` ran
    #[error("The global console context is already initialized")]
    AlreadyInitialized,

    /// Handler failed, panicked, or forwarding raised
    #[error("ConsoleInterceptorError: {message}")]
    Intercepted {
        method: ConsoleMethod,
        arguments: Vec<Value>,
        message: String,
    },

    /// A deferred handler reply did not settle in time
    #[error("ConsoleInterceptorError: handler for '{method}' did not resolve within {timeout:?}")]
    HandlerTimeout {
        method: ConsoleMethod,
        arguments: Vec<Value>,
        timeout: Duration,
    },

    /// A console sink refused or failed a call
    #[error("Console error ({method}): {message}")]
    Console {
        method: ConsoleMethod,
        message: String,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// No runtime was available to drive a deferred reply
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl InterceptorError {
    /// Wrap a handler or dispatch failure, keeping its message
    pub fn intercepted(
        method: ConsoleMethod,
        arguments: Vec<Value>,
        message: impl Into<String>,
    ) -> Self {
        InterceptorError::Intercepted {
            method,
            arguments,
            message: message.into(),
        }
    }

    /// Create a timeout error for a deferred reply
    pub fn timeout(method: ConsoleMethod, arguments: Vec<Value>, timeout: Duration) -> Self {
        InterceptorError::HandlerTimeout {
            method,
            arguments,
            timeout,
        }
    }

    /// Create a console sink error
    pub fn console(method: ConsoleMethod, message: impl Into<String>) -> Self {
        InterceptorError::Console {
            method,
            message: message.into(),
        }
    }

    /// Create a scheduler error
    pub fn scheduler<S: Into<String>>(msg: S) -> Self {
        InterceptorError::Scheduler(msg.into())
    }

    /// Whether this error is raised by `enable`/`install` rather than absorbed
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            InterceptorError::HandlerAlreadyRegistered
                | InterceptorError::AlreadyEnabled
                | InterceptorError::AlreadyInitialized
        )
    }

    /// The console method the failure is tagged with, if any
    pub fn method(&self) -> Option<&ConsoleMethod> {
        match self {
            InterceptorError::Intercepted { method, .. }
            | InterceptorError::HandlerTimeout { method, .. }
            | InterceptorError::Console { method, .. } => Some(method),
            _ => None,
        }
    }

    /// The original call arguments the failure is tagged with, if any
    pub fn arguments(&self) -> Option<&[Value]> {
        match self {
            InterceptorError::Intercepted { arguments, .. }
            | InterceptorError::HandlerTimeout { arguments, .. } => Some(arguments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_creation() {
        let err = InterceptorError::intercepted(ConsoleMethod::Log, vec![json!("a")], "boom");
        assert!(matches!(err, InterceptorError::Intercepted { .. }));
        assert!(!err.is_validation());

        assert!(InterceptorError::HandlerAlreadyRegistered.is_validation());
        assert!(InterceptorError::AlreadyEnabled.is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = InterceptorError::intercepted(ConsoleMethod::Warn, vec![], "handler exploded");
        assert_eq!(err.to_string(), "ConsoleInterceptorError: handler exploded");

        let err = InterceptorError::HandlerAlreadyRegistered;
        assert_eq!(err.to_string(), "This handler is already registered");

        let err = InterceptorError::console(ConsoleMethod::Error, "sink closed");
        assert_eq!(err.to_string(), "Console error (error): sink closed");
    }

    #[test]
    fn test_error_tags() {
        let err = InterceptorError::timeout(
            ConsoleMethod::Info,
            vec![json!(1)],
            Duration::from_millis(5),
        );
        assert_eq!(err.method(), Some(&ConsoleMethod::Info));
        assert_eq!(err.arguments(), Some(&[json!(1)][..]));
        assert!(err.to_string().contains("did not resolve"));

        assert!(InterceptorError::scheduler("no runtime").method().is_none());
    }
}
