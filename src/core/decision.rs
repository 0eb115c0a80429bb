//! Forwarding decisions returned by handlers

use super::method::ConsoleMethod;
use serde_json::Value;

/// What the interceptor should do with an intercepted call
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Decision {
    /// Forward the original call unchanged
    #[default]
    PassThrough,

    /// Drop the message
    Suppress,

    /// Call the same method with replacement arguments
    ///
    /// The value is normalized with [`normalize_arguments`].
    Forward(Value),

    /// Call another method and/or with other arguments
    ///
    /// Missing fields fall back to the original method and arguments.
    Redirect {
        method: Option<ConsoleMethod>,
        arguments: Option<Value>,
    },
}

impl Decision {
    pub fn forward(value: impl Into<Value>) -> Self {
        Decision::Forward(value.into())
    }

    /// Redirect to `method`, keeping the original arguments
    pub fn redirect(method: impl Into<ConsoleMethod>) -> Self {
        Decision::Redirect {
            method: Some(method.into()),
            arguments: None,
        }
    }

    /// Redirect to `method` with replacement arguments
    pub fn redirect_with(method: impl Into<ConsoleMethod>, arguments: impl Into<Value>) -> Self {
        Decision::Redirect {
            method: Some(method.into()),
            arguments: Some(arguments.into()),
        }
    }

    /// Keep the method, replace the arguments
    pub fn with_arguments(arguments: impl Into<Value>) -> Self {
        Decision::Redirect {
            method: None,
            arguments: Some(arguments.into()),
        }
    }

    /// Resolve against the intercepted call
    ///
    /// Returns `None` when the message is suppressed, otherwise the method
    /// and argument list to forward to the original console.
    pub fn resolve(
        self,
        method: &ConsoleMethod,
        arguments: &[Value],
    ) -> Option<(ConsoleMethod, Vec<Value>)> {
        match self {
            Decision::Suppress => None,
            Decision::PassThrough => Some((method.clone(), arguments.to_vec())),
            Decision::Forward(value) => Some((method.clone(), normalize_arguments(value))),
            Decision::Redirect {
                method: target,
                arguments: replacement,
            } => Some((
                target.unwrap_or_else(|| method.clone()),
                replacement
                    .map(normalize_arguments)
                    .unwrap_or_else(|| arguments.to_vec()),
            )),
        }
    }
}

/// Build a decision from a plain JSON reply
///
/// An object carrying a non-empty `method` name or a non-empty `arguments`
/// value is a redirect; any other value is forwarded as replacement
/// arguments.
impl From<Value> for Decision {
    fn from(value: Value) -> Self {
        if let Value::Object(fields) = &value {
            let method = fields
                .get("method")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(ConsoleMethod::from);
            let arguments = fields.get("arguments").filter(|a| !is_falsy(a)).cloned();
            if method.is_some() || arguments.is_some() {
                return Decision::Redirect { method, arguments };
            }
        }
        Decision::Forward(value)
    }
}

/// Whether a value counts as empty when building argument lists
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Turn a replacement value into an argument list
///
/// An array contributes its elements, anything else becomes a single
/// argument. Falsy entries are dropped either way.
pub fn normalize_arguments(value: Value) -> Vec<Value> {
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    items.into_iter().filter(|item| !is_falsy(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_single_value() {
        assert_eq!(normalize_arguments(json!("hi")), vec![json!("hi")]);
        assert_eq!(normalize_arguments(json!({"a": 1})), vec![json!({"a": 1})]);
    }

    #[test]
    fn test_normalize_drops_falsy() {
        let normalized = normalize_arguments(json!(["a", null, 0, "", false, 2, []]));
        assert_eq!(normalized, vec![json!("a"), json!(2), json!([])]);
        assert!(normalize_arguments(json!(null)).is_empty());
        assert!(normalize_arguments(json!(0.0)).is_empty());
    }

    #[test]
    fn test_object_reply_with_method_redirects() {
        let decision = Decision::from(json!({"method": "error", "arguments": ["x", null]}));
        assert_eq!(decision, Decision::redirect_with(ConsoleMethod::Error, json!(["x", null])));

        let (method, forwarded) = decision.resolve(&ConsoleMethod::Log, &[json!("orig")]).unwrap();
        assert_eq!(method, ConsoleMethod::Error);
        assert_eq!(forwarded, vec![json!("x")]);
    }

    #[test]
    fn test_object_reply_with_only_arguments_keeps_method() {
        let decision = Decision::from(json!({"arguments": "replaced"}));
        assert_eq!(decision, Decision::with_arguments(json!("replaced")));
    }

    #[test]
    fn test_plain_object_reply_is_forwarded() {
        let value = json!({"user": "ada", "method": ""});
        assert_eq!(Decision::from(value.clone()), Decision::Forward(value));
    }

    #[test]
    fn test_resolve_pass_through_keeps_falsy() {
        let args = vec![json!("x"), json!(null), json!(0)];
        let (method, forwarded) = Decision::PassThrough
            .resolve(&ConsoleMethod::Log, &args)
            .unwrap();
        assert_eq!(method, ConsoleMethod::Log);
        assert_eq!(forwarded, args);
    }

    #[test]
    fn test_resolve_suppress() {
        assert!(Decision::Suppress.resolve(&ConsoleMethod::Log, &[]).is_none());
    }

    #[test]
    fn test_resolve_forward_wraps_value() {
        let (method, forwarded) = Decision::forward("replaced")
            .resolve(&ConsoleMethod::Warn, &[json!("orig")])
            .unwrap();
        assert_eq!(method, ConsoleMethod::Warn);
        assert_eq!(forwarded, vec![json!("replaced")]);
    }

    #[test]
    fn test_resolve_redirect_defaults() {
        let args = [json!("orig")];
        let (method, forwarded) = Decision::redirect(ConsoleMethod::Error)
            .resolve(&ConsoleMethod::Log, &args)
            .unwrap();
        assert_eq!(method, ConsoleMethod::Error);
        assert_eq!(forwarded, vec![json!("orig")]);

        let (method, forwarded) = Decision::with_arguments(json!(["a", "b"]))
            .resolve(&ConsoleMethod::Info, &args)
            .unwrap();
        assert_eq!(method, ConsoleMethod::Info);
        assert_eq!(forwarded, vec![json!("a"), json!("b")]);
    }
}
