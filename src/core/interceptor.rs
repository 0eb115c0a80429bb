//! The intercepting console
//!
//! Every supported call runs through the handler registry. Each handler's
//! reply is turned into a forwarding action against the original console,
//! either immediately or once a deferred reply settles. Failures never
//! reach the call site; they are handed to error recovery instead.

use super::{
    console::Console,
    context::DisableHandle,
    decision::Decision,
    error::{HandlerError, InterceptorError, Result},
    handler::{same_handler, BoxFuture, Handler, HandlerExtra, Invocation, Reply},
    method::ConsoleMethod,
    metrics::InterceptorMetrics,
    options::{InterceptOptions, RegistrationMode},
    recovery::{call_isolated, panic_message, recover, RecoveryScope},
    scheduler::Scheduler,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// How a deferred reply ended
enum Settled {
    Decided(Decision),
    Failed(String),
    TimedOut(Duration),
}

struct Dispatch {
    original: Arc<dyn Console>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    options: InterceptOptions,
    disable: DisableHandle,
    metrics: Arc<InterceptorMetrics>,
    scheduler: Scheduler,
}

/// Console proxy that routes calls through registered handlers
pub struct InterceptingConsole {
    dispatch: Arc<Dispatch>,
}

impl InterceptingConsole {
    pub(crate) fn new(
        original: Arc<dyn Console>,
        handler: Arc<dyn Handler>,
        options: InterceptOptions,
        disable: DisableHandle,
        metrics: Arc<InterceptorMetrics>,
    ) -> Self {
        Self {
            dispatch: Arc::new(Dispatch {
                original,
                handlers: RwLock::new(vec![handler]),
                options,
                disable,
                metrics,
                scheduler: Scheduler,
            }),
        }
    }

    pub fn mode(&self) -> RegistrationMode {
        self.dispatch.options.mode
    }

    pub fn handler_count(&self) -> usize {
        self.dispatch.handlers.read().len()
    }

    pub(crate) fn contains(&self, handler: &Arc<dyn Handler>) -> bool {
        self.dispatch
            .handlers
            .read()
            .iter()
            .any(|registered| same_handler(registered, handler))
    }

    /// Add a handler unless it is already present
    pub(crate) fn register(&self, handler: Arc<dyn Handler>) -> bool {
        let mut handlers = self.dispatch.handlers.write();
        if handlers.iter().any(|registered| same_handler(registered, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }
}

impl Console for InterceptingConsole {
    fn call(&self, method: &ConsoleMethod, args: &[Value]) -> Result<()> {
        if !self.dispatch.original.supports(method) {
            return self.dispatch.original.call(method, args);
        }
        self.dispatch.run(Invocation::new(method.clone(), args.to_vec()));
        Ok(())
    }

    fn supports(&self, method: &ConsoleMethod) -> bool {
        self.dispatch.original.supports(method)
    }

    fn name(&self) -> &str {
        "interceptor"
    }
}

impl Dispatch {
    fn run(self: &Arc<Self>, invocation: Invocation) {
        self.metrics.record_intercepted();
        let extra = HandlerExtra::new(self.disable.clone());

        // Snapshot so handlers may enable/disable without holding the lock
        let handlers = self.handlers.read().clone();

        for handler in handlers {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.handle(&invocation, &extra)
            }));

            let reply = match outcome {
                Ok(Ok(reply)) => reply,
                Ok(Err(e)) => {
                    self.fail(&invocation, e.to_string());
                    return;
                }
                Err(panic_info) => {
                    self.fail(&invocation, panic_message(&*panic_info));
                    return;
                }
            };

            match reply {
                Reply::Now(decision) => {
                    if let Err(e) = self.forward(&invocation, decision) {
                        self.fail(&invocation, e.to_string());
                        return;
                    }
                }
                Reply::Later(future) => self.defer(invocation.clone(), future),
            }
        }
    }

    /// Apply a decision against the original console
    fn forward(&self, invocation: &Invocation, decision: Decision) -> Result<()> {
        match decision.resolve(&invocation.method, &invocation.arguments) {
            None => {
                self.metrics.record_suppressed();
                Ok(())
            }
            Some((method, arguments)) => {
                if !self.original.supports(&method) {
                    return Err(InterceptorError::console(method, "method not supported"));
                }
                if method == invocation.method {
                    self.metrics.record_forwarded();
                } else {
                    self.metrics.record_redirected();
                }
                call_isolated(&*self.original, &method, &arguments)
            }
        }
    }

    fn defer(
        self: &Arc<Self>,
        invocation: Invocation,
        future: BoxFuture<std::result::Result<Decision, HandlerError>>,
    ) {
        self.metrics.record_deferred();
        let dispatch = Arc::clone(self);
        let limit = self.options.handler_timeout;
        let pending = invocation.clone();

        let spawned = self.scheduler.spawn(async move {
            // Inner task so a panicking future surfaces as a JoinError
            let work = tokio::spawn(async move {
                match limit {
                    Some(limit) => match tokio::time::timeout(limit, future).await {
                        Ok(Ok(decision)) => Settled::Decided(decision),
                        Ok(Err(e)) => Settled::Failed(e.to_string()),
                        Err(_) => Settled::TimedOut(limit),
                    },
                    None => match future.await {
                        Ok(decision) => Settled::Decided(decision),
                        Err(e) => Settled::Failed(e.to_string()),
                    },
                }
            });

            let settled = match work.await {
                Ok(settled) => settled,
                Err(join_error) if join_error.is_panic() => {
                    Settled::Failed(panic_message(&*join_error.into_panic()))
                }
                Err(join_error) => Settled::Failed(join_error.to_string()),
            };

            match settled {
                Settled::Decided(decision) => {
                    if let Err(e) = dispatch.forward(&pending, decision) {
                        dispatch.fail(&pending, e.to_string());
                    }
                }
                Settled::Failed(message) => dispatch.fail(&pending, message),
                Settled::TimedOut(limit) => dispatch.time_out(&pending, limit),
            }
        });

        if let Err(e) = spawned {
            self.fail(&invocation, e.to_string());
        }
    }

    fn fail(&self, invocation: &Invocation, message: String) {
        self.metrics.record_failure();
        let error = InterceptorError::intercepted(
            invocation.method.clone(),
            invocation.arguments.clone(),
            message,
        );
        self.recover(error, invocation);
    }

    fn time_out(&self, invocation: &Invocation, limit: Duration) {
        self.metrics.record_failure();
        self.metrics.record_timeout();
        let error = InterceptorError::timeout(
            invocation.method.clone(),
            invocation.arguments.clone(),
            limit,
        );
        self.recover(error, invocation);
    }

    fn recover(&self, error: InterceptorError, invocation: &Invocation) {
        recover(
            error,
            invocation.method.clone(),
            invocation.arguments.clone(),
            RecoveryScope {
                console: Arc::clone(&self.original),
                disable: self.disable.clone(),
                on_error: self.options.on_error.clone(),
                metrics: Arc::clone(&self.metrics),
            },
        );
    }
}
