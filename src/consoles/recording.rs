//! In-memory console that records every call
//!
//! Useful as the original console in tests and for capturing what an
//! interceptor let through. Clones share the same record.

use super::stdio::join_arguments;
use crate::core::{Console, ConsoleMethod, InterceptorError, Result};
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// One call that reached a [`RecordingConsole`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleCall {
    pub method: ConsoleMethod,
    pub arguments: Vec<Value>,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleCall {
    pub fn new(method: ConsoleMethod, arguments: Vec<Value>) -> Self {
        Self {
            method,
            arguments,
            timestamp: Utc::now(),
        }
    }

    /// Arguments joined the way a terminal would print them
    pub fn text(&self) -> String {
        join_arguments(&self.arguments)
    }
}

#[derive(Clone, Default)]
pub struct RecordingConsole {
    calls: Arc<Mutex<Vec<ConsoleCall>>>,
    subscribers: Arc<Mutex<Vec<Sender<ConsoleCall>>>>,
    methods: Option<HashSet<ConsoleMethod>>,
    failing: HashSet<ConsoleMethod>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `methods` are supported; other calls fail without recording
    #[must_use]
    pub fn with_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = ConsoleMethod>,
    {
        self.methods = Some(methods.into_iter().collect());
        self
    }

    /// Calls to `method` fail with a console error
    #[must_use]
    pub fn failing_on(mut self, method: ConsoleMethod) -> Self {
        self.failing.insert(method);
        self
    }

    /// Snapshot of every recorded call, oldest first
    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.calls.lock().clone()
    }

    /// Drain the record
    pub fn take(&self) -> Vec<ConsoleCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Receive every call recorded from now on
    pub fn subscribe(&self) -> Receiver<ConsoleCall> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }
}

impl Console for RecordingConsole {
    fn call(&self, method: &ConsoleMethod, args: &[Value]) -> Result<()> {
        if !self.supports(method) {
            return Err(InterceptorError::console(method.clone(), "method not supported"));
        }
        if self.failing.contains(method) {
            return Err(InterceptorError::console(method.clone(), "injected failure"));
        }

        let call = ConsoleCall::new(method.clone(), args.to_vec());
        self.calls.lock().push(call.clone());
        self.subscribers
            .lock()
            .retain(|subscriber| subscriber.send(call.clone()).is_ok());
        Ok(())
    }

    fn supports(&self, method: &ConsoleMethod) -> bool {
        match &self.methods {
            Some(methods) => methods.contains(method),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
