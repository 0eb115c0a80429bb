//! Background runtime for deferred handler replies
//!
//! Deferred replies never block the console call site. They are driven on a
//! small tokio runtime owned by the crate, built on first use, so that
//! interception works the same from synchronous code and from inside any
//! caller runtime.

use super::error::{InterceptorError, Result};
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

const WORKER_THREADS: usize = 2;

static RUNTIME: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();

fn runtime() -> Result<&'static Runtime> {
    let built = RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .thread_name("console-interceptor")
            .enable_all()
            .build()
            .map_err(|e| e.to_string())
    });

    match built {
        Ok(runtime) => Ok(runtime),
        Err(message) => Err(InterceptorError::scheduler(message.clone())),
    }
}

/// Spawns continuations for deferred replies
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scheduler;

impl Scheduler {
    pub(crate) fn spawn<F>(&self, task: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        runtime()?.spawn(task);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    #[test]
    fn test_spawn_from_sync_code() {
        let (tx, rx) = bounded(1);
        Scheduler
            .spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                let _ = tx.send(42);
            })
            .unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), 42);
    }

    #[tokio::test]
    async fn test_spawn_from_caller_runtime() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        Scheduler
            .spawn(async move {
                let _ = tx.send("done");
            })
            .unwrap();
        assert_eq!(rx.await.unwrap(), "done");
    }
}
