//! Interceptor metrics for observability
//!
//! Counts what happened to intercepted calls: how many were seen, how many
//! were suppressed, forwarded or redirected, and how many ended in error
//! recovery.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for intercepted console traffic
///
/// # Example
///
/// ```
/// use console_interceptor::InterceptorMetrics;
///
/// let metrics = InterceptorMetrics::new();
///
/// metrics.record_intercepted();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.intercepted(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct InterceptorMetrics {
    /// Calls that reached the handler registry
    intercepted: AtomicU64,

    /// Handler decisions that dropped the message
    suppressed: AtomicU64,

    /// Messages forwarded to the same method
    forwarded: AtomicU64,

    /// Messages forwarded to a different method
    redirected: AtomicU64,

    /// Handler replies that were resolved asynchronously
    deferred: AtomicU64,

    /// Handler errors, panics and forwarding failures
    failures: AtomicU64,

    /// Deferred replies that exceeded the handler timeout
    timeouts: AtomicU64,

    /// Times the default recovery sequence ran
    recoveries: AtomicU64,
}

impl InterceptorMetrics {
    pub const fn new() -> Self {
        Self {
            intercepted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            forwarded: AtomicU64::new(0),
            redirected: AtomicU64::new(0),
            deferred: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            recoveries: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn intercepted(&self) -> u64 {
        self.intercepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn redirected(&self) -> u64 {
        self.redirected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deferred(&self) -> u64 {
        self.deferred.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn timeouts(&self) -> u64 {
        self.timeouts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn recoveries(&self) -> u64 {
        self.recoveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_intercepted(&self) -> u64 {
        self.intercepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_forwarded(&self) -> u64 {
        self.forwarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_redirected(&self) -> u64 {
        self.redirected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_deferred(&self) -> u64 {
        self.deferred.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_timeout(&self) -> u64 {
        self.timeouts.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_recovery(&self) -> u64 {
        self.recoveries.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of intercepted calls that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been intercepted.
    pub fn failure_rate(&self) -> f64 {
        let total = self.intercepted() as f64;
        if total == 0.0 {
            0.0
        } else {
            (self.failures() as f64 / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.intercepted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.forwarded.store(0, Ordering::Relaxed);
        self.redirected.store(0, Ordering::Relaxed);
        self.deferred.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.timeouts.store(0, Ordering::Relaxed);
        self.recoveries.store(0, Ordering::Relaxed);
    }
}

impl Default for InterceptorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InterceptorMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            intercepted: AtomicU64::new(self.intercepted()),
            suppressed: AtomicU64::new(self.suppressed()),
            forwarded: AtomicU64::new(self.forwarded()),
            redirected: AtomicU64::new(self.redirected()),
            deferred: AtomicU64::new(self.deferred()),
            failures: AtomicU64::new(self.failures()),
            timeouts: AtomicU64::new(self.timeouts()),
            recoveries: AtomicU64::new(self.recoveries()),
        }
    }
}
