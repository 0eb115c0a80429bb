//! Terminal console implementation

use crate::core::{Console, ConsoleMethod, Result};
use chrono::Utc;
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

const INDENT: &str = "  ";

#[derive(Default)]
struct Counters {
    group_depth: usize,
    counts: HashMap<String, u64>,
    timers: HashMap<String, Instant>,
}

/// Writes console calls to stdout, diagnostics to stderr
pub struct StdConsole {
    use_colors: bool,
    show_timestamps: bool,
    state: Mutex<Counters>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            show_timestamps: false,
            state: Mutex::new(Counters::default()),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Prefix every line with an RFC 3339 timestamp
    ///
    /// # Examples
    ///
    /// ```
    /// use console_interceptor::consoles::StdConsole;
    ///
    /// let console = StdConsole::new().with_timestamps(true);
    /// ```
    #[must_use]
    pub fn with_timestamps(mut self, show_timestamps: bool) -> Self {
        self.show_timestamps = show_timestamps;
        self
    }

    /// Render one line for `method`, or `None` when nothing is printed
    fn render(&self, method: &ConsoleMethod, args: &[Value]) -> Option<String> {
        let mut state = self.state.lock();
        let body = match method {
            ConsoleMethod::Clear | ConsoleMethod::Custom(_) => return None,
            ConsoleMethod::Group => {
                let label = join_arguments(args);
                state.group_depth += 1;
                if label.is_empty() {
                    return None;
                }
                // Label sits at the parent depth
                return Some(self.decorate(method, &label, state.group_depth - 1));
            }
            ConsoleMethod::GroupEnd => {
                state.group_depth = state.group_depth.saturating_sub(1);
                return None;
            }
            ConsoleMethod::Assert => {
                if args.first().map(is_truthy).unwrap_or(false) {
                    return None;
                }
                let rest = join_arguments(args.get(1..).unwrap_or_default());
                if rest.is_empty() {
                    "Assertion failed".to_string()
                } else {
                    format!("Assertion failed: {}", rest)
                }
            }
            ConsoleMethod::Count => {
                let label = label_of(args);
                let count = state.counts.entry(label.clone()).or_insert(0);
                *count += 1;
                format!("{}: {}", label, count)
            }
            ConsoleMethod::Time => {
                state.timers.insert(label_of(args), Instant::now());
                return None;
            }
            ConsoleMethod::TimeEnd => {
                let label = label_of(args);
                match state.timers.remove(&label) {
                    Some(started) => format!(
                        "{}: {:.3}ms",
                        label,
                        started.elapsed().as_secs_f64() * 1000.0
                    ),
                    None => format!("Timer '{}' does not exist", label),
                }
            }
            ConsoleMethod::Trace => format!("Trace: {}", join_arguments(args)),
            ConsoleMethod::Dir | ConsoleMethod::Table => args
                .iter()
                .map(|arg| serde_json::to_string_pretty(arg).unwrap_or_else(|_| arg.to_string()))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => join_arguments(args),
        };

        Some(self.decorate(method, &body, state.group_depth))
    }

    fn decorate(&self, method: &ConsoleMethod, body: &str, depth: usize) -> String {
        let mut line = String::new();
        if self.show_timestamps {
            line.push_str(&format!("[{}] ", Utc::now().to_rfc3339()));
        }
        line.push_str(&self.tag(method));
        line.push_str(&INDENT.repeat(depth));
        line.push_str(body);
        line
    }

    fn tag(&self, method: &ConsoleMethod) -> String {
        let label = match method {
            ConsoleMethod::Info => "INFO",
            ConsoleMethod::Warn => "WARN",
            ConsoleMethod::Error | ConsoleMethod::Assert => "ERROR",
            ConsoleMethod::Debug => "DEBUG",
            ConsoleMethod::Trace => "TRACE",
            _ => return String::new(),
        };

        #[cfg(feature = "console")]
        if self.use_colors {
            return format!("{} ", format!("{:5}", label).color(method.color_code()));
        }

        format!("{:5} ", label)
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn call(&self, method: &ConsoleMethod, args: &[Value]) -> Result<()> {
        let Some(line) = self.render(method, args) else {
            return Ok(());
        };

        // Diagnostics go to stderr, everything else to stdout
        if method.is_diagnostic() {
            let mut stderr = std::io::stderr().lock();
            writeln!(stderr, "{}", line)?;
        } else {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", line)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stdio"
    }
}

/// Join arguments with spaces; strings are written without quotes
pub fn join_arguments(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn label_of(args: &[Value]) -> String {
    match args.first() {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | None => "default".to_string(),
        Some(other) => join_arguments(std::slice::from_ref(other)),
    }
}

fn is_truthy(value: &Value) -> bool {
    !crate::core::decision::is_falsy(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() -> StdConsole {
        StdConsole::with_colors(false)
    }

    #[test]
    fn test_join_arguments() {
        let line = join_arguments(&[json!("count"), json!(3), json!({"k": true}), json!(null)]);
        assert_eq!(line, "count 3 {\"k\":true} null");
    }

    #[test]
    fn test_render_levels() {
        let console = plain();
        assert_eq!(console.render(&ConsoleMethod::Log, &[json!("hi")]).unwrap(), "hi");
        assert_eq!(
            console.render(&ConsoleMethod::Warn, &[json!("careful")]).unwrap(),
            "WARN  careful"
        );
        assert!(console.render(&ConsoleMethod::Clear, &[]).is_none());
    }

    #[test]
    fn test_groups_indent() {
        let console = plain();
        assert_eq!(console.render(&ConsoleMethod::Group, &[json!("outer")]).unwrap(), "outer");
        assert_eq!(console.render(&ConsoleMethod::Log, &[json!("inner")]).unwrap(), "  inner");
        assert!(console.render(&ConsoleMethod::GroupEnd, &[]).is_none());
        assert_eq!(console.render(&ConsoleMethod::Log, &[json!("back")]).unwrap(), "back");
        // Unbalanced groupEnd stays at zero
        assert!(console.render(&ConsoleMethod::GroupEnd, &[]).is_none());
    }

    #[test]
    fn test_count_and_assert() {
        let console = plain();
        assert_eq!(console.render(&ConsoleMethod::Count, &[]).unwrap(), "default: 1");
        assert_eq!(console.render(&ConsoleMethod::Count, &[]).unwrap(), "default: 2");
        assert_eq!(console.render(&ConsoleMethod::Count, &[json!("x")]).unwrap(), "x: 1");

        assert!(console.render(&ConsoleMethod::Assert, &[json!(true), json!("ok")]).is_none());
        assert_eq!(
            console.render(&ConsoleMethod::Assert, &[json!(false), json!("broken")]).unwrap(),
            "ERROR Assertion failed: broken"
        );
    }

    #[test]
    fn test_timers() {
        let console = plain();
        assert!(console.render(&ConsoleMethod::Time, &[json!("load")]).is_none());
        let line = console.render(&ConsoleMethod::TimeEnd, &[json!("load")]).unwrap();
        assert!(line.starts_with("load: ") && line.ends_with("ms"), "{}", line);
        assert_eq!(
            console.render(&ConsoleMethod::TimeEnd, &[json!("load")]).unwrap(),
            "Timer 'load' does not exist"
        );
    }

    #[test]
    fn test_custom_methods_unsupported() {
        let console = plain();
        assert!(console.supports(&ConsoleMethod::Table));
        assert!(!console.supports(&ConsoleMethod::custom("audit")));
    }

    #[test]
    fn test_timestamps_prefix() {
        let console = plain().with_timestamps(true);
        let line = console.render(&ConsoleMethod::Log, &[json!("x")]).unwrap();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] x"));
    }
}
