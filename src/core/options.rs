//! Options controlling how handlers are registered and failures recovered

use super::{error::InterceptorError, recovery::Recovery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on how long a deferred handler reply may pend (30 seconds)
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

/// Callback run instead of the default recovery when interception fails
pub type ErrorCallback = Arc<dyn Fn(&InterceptorError, &Recovery) + Send + Sync>;

/// How `enable` treats handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// One handler governs all calls; re-registration is rejected
    #[default]
    Single,

    /// Every registered handler sees every call
    Multi,
}

#[derive(Clone)]
pub struct InterceptOptions {
    pub(crate) mode: RegistrationMode,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) handler_timeout: Option<Duration>,
}

impl InterceptOptions {
    pub fn new() -> Self {
        Self {
            mode: RegistrationMode::Single,
            on_error: None,
            handler_timeout: Some(DEFAULT_HANDLER_TIMEOUT),
        }
    }

    /// Options for open multi-handler registration
    pub fn multi() -> Self {
        Self::builder().mode(RegistrationMode::Multi).build()
    }

    #[must_use]
    pub fn builder() -> InterceptOptionsBuilder {
        InterceptOptionsBuilder::new()
    }

    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }

    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout
    }

    pub fn has_error_callback(&self) -> bool {
        self.on_error.is_some()
    }
}

impl Default for InterceptOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InterceptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptOptions")
            .field("mode", &self.mode)
            .field("on_error", &self.on_error.is_some())
            .field("handler_timeout", &self.handler_timeout)
            .finish()
    }
}

impl From<ErrorCallback> for InterceptOptions {
    fn from(callback: ErrorCallback) -> Self {
        Self::builder().on_error_callback(callback).build()
    }
}

impl From<RegistrationMode> for InterceptOptions {
    fn from(mode: RegistrationMode) -> Self {
        Self::builder().mode(mode).build()
    }
}

/// Builder for [`InterceptOptions`]
///
/// # Example
/// ```
/// use console_interceptor::prelude::*;
/// use std::time::Duration;
///
/// let options = InterceptOptions::builder()
///     .mode(RegistrationMode::Multi)
///     .handler_timeout(Duration::from_secs(2))
///     .on_error(|error, recovery| {
///         eprintln!("handler failed: {}", error);
///         recovery.log();
///     })
///     .build();
/// assert_eq!(options.mode(), RegistrationMode::Multi);
/// ```
pub struct InterceptOptionsBuilder {
    options: InterceptOptions,
}

impl InterceptOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: InterceptOptions::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn mode(mut self, mode: RegistrationMode) -> Self {
        self.options.mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&InterceptorError, &Recovery) + Send + Sync + 'static,
    {
        self.options.on_error = Some(Arc::new(callback));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.options.on_error = Some(callback);
        self
    }

    /// Bound deferred replies; expiry runs error recovery
    #[must_use = "builder methods return a new value"]
    pub fn handler_timeout(mut self, timeout: Duration) -> Self {
        self.options.handler_timeout = Some(timeout);
        self
    }

    /// Let deferred replies pend forever
    #[must_use = "builder methods return a new value"]
    pub fn no_handler_timeout(mut self) -> Self {
        self.options.handler_timeout = None;
        self
    }

    pub fn build(self) -> InterceptOptions {
        self.options
    }
}

impl Default for InterceptOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
