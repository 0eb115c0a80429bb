//! Handler traits invoked for every intercepted console call

use super::{
    context::DisableHandle,
    decision::Decision,
    error::HandlerError,
    method::ConsoleMethod,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future produced by a deferred reply
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Result a handler returns for one call
pub type HandlerResult = std::result::Result<Reply, HandlerError>;

/// The intercepted call, as seen by handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub method: ConsoleMethod,
    pub arguments: Vec<Value>,
}

impl Invocation {
    pub fn new(method: ConsoleMethod, arguments: Vec<Value>) -> Self {
        Self { method, arguments }
    }
}

/// Extra capabilities handed to a handler alongside the call
#[derive(Clone)]
pub struct HandlerExtra {
    disable: DisableHandle,
}

impl HandlerExtra {
    pub(crate) fn new(disable: DisableHandle) -> Self {
        Self { disable }
    }

    /// Restore the original console from inside a handler
    pub fn disable(&self) {
        self.disable.disable();
    }

    pub fn disable_handle(&self) -> &DisableHandle {
        &self.disable
    }
}

/// A handler's answer: decided now, or once a future settles
pub enum Reply {
    Now(Decision),
    Later(BoxFuture<std::result::Result<Decision, HandlerError>>),
}

impl Reply {
    pub fn later<F>(future: F) -> Self
    where
        F: Future<Output = std::result::Result<Decision, HandlerError>> + Send + 'static,
    {
        Reply::Later(Box::pin(future))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Reply::Later(_))
    }
}

impl From<Decision> for Reply {
    fn from(decision: Decision) -> Self {
        Reply::Now(decision)
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Now(decision) => f.debug_tuple("Now").field(decision).finish(),
            Reply::Later(_) => f.write_str("Later(..)"),
        }
    }
}

/// Decides what happens to each intercepted call
///
/// Any `Fn(&Invocation, &HandlerExtra) -> HandlerResult` is a handler.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, call: &Invocation, extra: &HandlerExtra) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Invocation, &HandlerExtra) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, call: &Invocation, extra: &HandlerExtra) -> HandlerResult {
        self(call, extra)
    }
}

/// Handler whose decision is computed asynchronously
///
/// # Example
///
/// ```no_run
/// use console_interceptor::core::{AsyncHandler, Decision, HandlerError, Invocation};
/// use async_trait::async_trait;
///
/// struct Redactor;
///
/// #[async_trait]
/// impl AsyncHandler for Redactor {
///     async fn handle(&self, call: &Invocation) -> Result<Decision, HandlerError> {
///         if call.arguments.iter().any(|a| a.as_str() == Some("secret")) {
///             return Ok(Decision::Suppress);
///         }
///         Ok(Decision::PassThrough)
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncHandler: Send + Sync + 'static {
    async fn handle(&self, call: &Invocation) -> std::result::Result<Decision, HandlerError>;
}

/// Adapts an [`AsyncHandler`] into a [`Handler`] producing deferred replies
pub struct Deferred<H: AsyncHandler> {
    inner: Arc<H>,
}

impl<H: AsyncHandler> Deferred<H> {
    pub fn new(handler: H) -> Self {
        Self {
            inner: Arc::new(handler),
        }
    }
}

impl<H: AsyncHandler> Handler for Deferred<H> {
    fn handle(&self, call: &Invocation, _extra: &HandlerExtra) -> HandlerResult {
        let inner = Arc::clone(&self.inner);
        let call = call.clone();
        Ok(Reply::later(async move { inner.handle(&call).await }))
    }
}

/// Share a closure handler so it can be registered and compared
///
/// Handler types that are not closures can be registered with `Arc::new`.
pub fn handler<F>(f: F) -> Arc<dyn Handler>
where
    F: Fn(&Invocation, &HandlerExtra) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Shorthand for wrapping an async handler
pub fn async_handler<H: AsyncHandler>(handler: H) -> Arc<dyn Handler> {
    Arc::new(Deferred::new(handler))
}

/// Identity of a registered handler
pub(crate) fn same_handler(a: &Arc<dyn Handler>, b: &Arc<dyn Handler>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
