//! Console context: owner of the original and the active console
//!
//! A context captures the original console once, hands out whichever
//! console is currently active, and swaps the active console for an
//! [`InterceptingConsole`] on `enable`. `disable` puts the original back.
//! Enable and disable are serialized by the context's lock; handlers never
//! run while it is held.

use super::{
    console::Console,
    error::{InterceptorError, Result},
    handler::Handler,
    interceptor::InterceptingConsole,
    metrics::InterceptorMetrics,
    options::{InterceptOptions, RegistrationMode},
};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

struct Slot {
    active: Arc<dyn Console>,
    interceptor: Option<Arc<InterceptingConsole>>,
}

pub(crate) struct ContextInner {
    original: Arc<dyn Console>,
    slot: RwLock<Slot>,
    metrics: Arc<InterceptorMetrics>,
}

impl ContextInner {
    fn restore(&self) {
        let mut slot = self.slot.write();
        slot.active = Arc::clone(&self.original);
        slot.interceptor = None;
    }
}

/// Restores the original console of the context it came from
///
/// Cloneable and idempotent: restoring an already restored context is a
/// no-op. The handle does not keep the context alive.
#[derive(Clone)]
pub struct DisableHandle {
    inner: Weak<ContextInner>,
}

impl DisableHandle {
    /// A handle bound to no context; `disable` does nothing
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn disable(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.restore();
        }
    }
}

impl std::fmt::Debug for DisableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisableHandle")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Swappable console slot with enable/disable
///
/// # Example
///
/// ```
/// use console_interceptor::prelude::*;
/// use serde_json::json;
///
/// let recording = RecordingConsole::new();
/// let context = ConsoleContext::with_console(recording.clone());
///
/// let disable = context
///     .enable(
///         handler(|call, _| {
///             if call.method == ConsoleMethod::Debug {
///                 return Ok(Decision::Suppress.into());
///             }
///             Ok(Decision::PassThrough.into())
///         }),
///         InterceptOptions::default(),
///     )
///     .unwrap();
///
/// context.console().debug(&[json!("noise")]).unwrap();
/// context.console().info(&[json!("kept")]).unwrap();
/// disable.disable();
///
/// assert_eq!(recording.calls().len(), 1);
/// assert!(!context.is_enabled());
/// ```
#[derive(Clone)]
pub struct ConsoleContext {
    inner: Arc<ContextInner>,
}

impl ConsoleContext {
    /// Capture `original` as the console to restore on disable
    pub fn new(original: Arc<dyn Console>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                slot: RwLock::new(Slot {
                    active: Arc::clone(&original),
                    interceptor: None,
                }),
                original,
                metrics: Arc::new(InterceptorMetrics::new()),
            }),
        }
    }

    pub fn with_console<C: Console + 'static>(console: C) -> Self {
        Self::new(Arc::new(console))
    }

    /// The currently active console
    pub fn console(&self) -> Arc<dyn Console> {
        Arc::clone(&self.inner.slot.read().active)
    }

    /// The original, un-intercepted console
    pub fn original(&self) -> Arc<dyn Console> {
        Arc::clone(&self.inner.original)
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.slot.read().interceptor.is_some()
    }

    /// Whether `console` is the original console of this context
    pub fn is_original(&self, console: &Arc<dyn Console>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(console), Arc::as_ptr(&self.inner.original))
    }

    /// Number of handlers on the installed interceptor
    pub fn handler_count(&self) -> usize {
        self.inner
            .slot
            .read()
            .interceptor
            .as_ref()
            .map(|interceptor| interceptor.handler_count())
            .unwrap_or(0)
    }

    pub fn metrics(&self) -> &InterceptorMetrics {
        &self.inner.metrics
    }

    pub fn disable_handle(&self) -> DisableHandle {
        DisableHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Route every call on this context's console through `handler`
    ///
    /// In single-handler mode the handler must not already be installed, and
    /// no other handler may be active. In multi-handler mode the handler
    /// joins the installed interceptor, whose options stay in force.
    /// Validation failures leave the context untouched.
    pub fn enable(
        &self,
        handler: Arc<dyn Handler>,
        options: impl Into<InterceptOptions>,
    ) -> Result<DisableHandle> {
        let options = options.into();
        let mut slot = self.inner.slot.write();

        if let Some(interceptor) = slot.interceptor.as_ref() {
            if interceptor.contains(&handler) {
                return match options.mode() {
                    RegistrationMode::Single => Err(InterceptorError::HandlerAlreadyRegistered),
                    RegistrationMode::Multi => Ok(self.disable_handle()),
                };
            }

            if options.mode() == RegistrationMode::Single
                || interceptor.mode() == RegistrationMode::Single
            {
                return Err(InterceptorError::AlreadyEnabled);
            }

            interceptor.register(handler);
            return Ok(self.disable_handle());
        }

        let interceptor = Arc::new(InterceptingConsole::new(
            Arc::clone(&self.inner.original),
            handler,
            options,
            self.disable_handle(),
            Arc::clone(&self.inner.metrics),
        ));
        slot.active = Arc::clone(&interceptor) as Arc<dyn Console>;
        slot.interceptor = Some(interceptor);

        Ok(self.disable_handle())
    }

    /// Restore the original console unconditionally
    pub fn disable(&self) {
        self.inner.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consoles::RecordingConsole;
    use crate::core::{decision::Decision, handler::handler};

    fn pass() -> Arc<dyn Handler> {
        handler(|_, _| Ok(Decision::PassThrough.into()))
    }

    #[test]
    fn test_enable_swaps_console() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        assert!(context.is_original(&context.console()));

        context.enable(pass(), InterceptOptions::default()).unwrap();
        assert!(context.is_enabled());
        assert!(!context.is_original(&context.console()));
        assert_eq!(context.console().name(), "interceptor");
    }

    #[test]
    fn test_disable_restores_original() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        let handle = context.enable(pass(), InterceptOptions::default()).unwrap();

        handle.disable();
        assert!(context.is_original(&context.console()));
        assert!(!context.is_enabled());

        // Idempotent
        handle.disable();
        context.disable();
        assert!(context.is_original(&context.console()));
    }

    #[test]
    fn test_single_mode_rejects_duplicate() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        let h = pass();
        context.enable(Arc::clone(&h), InterceptOptions::default()).unwrap();
        let active = context.console();

        let err = context
            .enable(Arc::clone(&h), InterceptOptions::default())
            .unwrap_err();
        assert!(matches!(err, InterceptorError::HandlerAlreadyRegistered));
        assert!(std::ptr::addr_eq(Arc::as_ptr(&active), Arc::as_ptr(&context.console())));
        assert_eq!(context.handler_count(), 1);
    }

    #[test]
    fn test_single_mode_rejects_second_handler() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        context.enable(pass(), InterceptOptions::default()).unwrap();

        let err = context.enable(pass(), InterceptOptions::multi()).unwrap_err();
        assert!(matches!(err, InterceptorError::AlreadyEnabled));
        assert_eq!(context.handler_count(), 1);
    }

    #[test]
    fn test_multi_mode_collects_handlers() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        let h = pass();
        context.enable(Arc::clone(&h), InterceptOptions::multi()).unwrap();
        context.enable(pass(), InterceptOptions::multi()).unwrap();
        context.enable(Arc::clone(&h), InterceptOptions::multi()).unwrap();

        assert_eq!(context.handler_count(), 2);
    }

    #[test]
    fn test_reenable_after_disable() {
        let context = ConsoleContext::with_console(RecordingConsole::new());
        let h = pass();
        context.enable(Arc::clone(&h), InterceptOptions::default()).unwrap();
        context.disable();
        assert_eq!(context.handler_count(), 0);

        context.enable(h, InterceptOptions::default()).unwrap();
        assert!(context.is_enabled());
    }

    #[test]
    fn test_handle_outlives_context() {
        let handle = {
            let context = ConsoleContext::with_console(RecordingConsole::new());
            context.enable(pass(), InterceptOptions::default()).unwrap()
        };
        handle.disable();
        assert!(format!("{:?}", handle).contains("attached: false"));
    }
}
