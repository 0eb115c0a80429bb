//! Console trait for swappable logging sinks

use super::{error::Result, method::ConsoleMethod};
use serde_json::Value;

/// A logging sink addressed by method name
///
/// `supports` plays the role of "is this property callable": the
/// interceptor only wraps supported methods and hands everything else to
/// the original console untouched.
pub trait Console: Send + Sync {
    fn call(&self, method: &ConsoleMethod, args: &[Value]) -> Result<()>;

    fn supports(&self, method: &ConsoleMethod) -> bool {
        !method.is_custom()
    }

    fn name(&self) -> &str;

    #[inline]
    fn log(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Log, args)
    }

    #[inline]
    fn info(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Info, args)
    }

    #[inline]
    fn warn(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Warn, args)
    }

    #[inline]
    fn error(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Error, args)
    }

    #[inline]
    fn debug(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Debug, args)
    }

    #[inline]
    fn trace(&self, args: &[Value]) -> Result<()> {
        self.call(&ConsoleMethod::Trace, args)
    }
}
