//! Console method definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A method callable on a console
///
/// The known methods cover the usual console surface. `Custom` carries any
/// other name so that consoles exposing extra levels are wrapped through the
/// same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(into = "String", from = "String")]
pub enum ConsoleMethod {
    #[default]
    Log,
    Info,
    Warn,
    Error,
    Debug,
    Trace,
    Dir,
    Table,
    Assert,
    Count,
    Time,
    TimeEnd,
    Group,
    GroupEnd,
    Clear,
    Custom(String),
}

impl ConsoleMethod {
    /// Every non-custom method, in declaration order
    pub const KNOWN: [ConsoleMethod; 15] = [
        ConsoleMethod::Log,
        ConsoleMethod::Info,
        ConsoleMethod::Warn,
        ConsoleMethod::Error,
        ConsoleMethod::Debug,
        ConsoleMethod::Trace,
        ConsoleMethod::Dir,
        ConsoleMethod::Table,
        ConsoleMethod::Assert,
        ConsoleMethod::Count,
        ConsoleMethod::Time,
        ConsoleMethod::TimeEnd,
        ConsoleMethod::Group,
        ConsoleMethod::GroupEnd,
        ConsoleMethod::Clear,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ConsoleMethod::Log => "log",
            ConsoleMethod::Info => "info",
            ConsoleMethod::Warn => "warn",
            ConsoleMethod::Error => "error",
            ConsoleMethod::Debug => "debug",
            ConsoleMethod::Trace => "trace",
            ConsoleMethod::Dir => "dir",
            ConsoleMethod::Table => "table",
            ConsoleMethod::Assert => "assert",
            ConsoleMethod::Count => "count",
            ConsoleMethod::Time => "time",
            ConsoleMethod::TimeEnd => "timeEnd",
            ConsoleMethod::Group => "group",
            ConsoleMethod::GroupEnd => "groupEnd",
            ConsoleMethod::Clear => "clear",
            ConsoleMethod::Custom(name) => name,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        ConsoleMethod::Custom(name.into())
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ConsoleMethod::Custom(_))
    }

    /// Methods that a terminal console routes to stderr
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            ConsoleMethod::Warn | ConsoleMethod::Error | ConsoleMethod::Trace | ConsoleMethod::Assert
        )
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            ConsoleMethod::Trace => BrightBlack,
            ConsoleMethod::Debug => Blue,
            ConsoleMethod::Info => Green,
            ConsoleMethod::Warn => Yellow,
            ConsoleMethod::Error | ConsoleMethod::Assert => Red,
            _ => White,
        }
    }
}

impl fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsoleMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("Invalid console method: ''".to_string());
        }
        Ok(ConsoleMethod::KNOWN
            .iter()
            .find(|known| known.as_str() == s)
            .cloned()
            .unwrap_or_else(|| ConsoleMethod::Custom(s.to_string())))
    }
}

/// Infallible conversion for names coming from code; an empty name stays
/// custom so it is never mistaken for `log`
impl From<&str> for ConsoleMethod {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| ConsoleMethod::Custom(s.to_string()))
    }
}

impl From<String> for ConsoleMethod {
    fn from(s: String) -> Self {
        ConsoleMethod::from(s.as_str())
    }
}

impl From<ConsoleMethod> for String {
    fn from(method: ConsoleMethod) -> Self {
        method.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_parse() {
        for method in ConsoleMethod::KNOWN.iter() {
            let parsed: ConsoleMethod = method.as_str().parse().unwrap();
            assert_eq!(&parsed, method);
        }
        assert_eq!("timeEnd".parse::<ConsoleMethod>().unwrap(), ConsoleMethod::TimeEnd);
    }

    #[test]
    fn test_unknown_method_is_custom() {
        let parsed: ConsoleMethod = "verbose".parse().unwrap();
        assert_eq!(parsed, ConsoleMethod::custom("verbose"));
        assert!(parsed.is_custom());
        assert_eq!(parsed.to_string(), "verbose");
    }

    #[test]
    fn test_empty_method_rejected() {
        assert!("".parse::<ConsoleMethod>().is_err());
    }

    #[test]
    fn test_empty_name_converts_to_custom() {
        let method = ConsoleMethod::from("");
        assert_eq!(method, ConsoleMethod::custom(""));
        assert!(method.is_custom());
        assert_ne!(method, ConsoleMethod::Log);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&ConsoleMethod::GroupEnd).unwrap();
        assert_eq!(json, "\"groupEnd\"");
        let back: ConsoleMethod = serde_json::from_str("\"audit\"").unwrap();
        assert_eq!(back, ConsoleMethod::custom("audit"));
    }
}
