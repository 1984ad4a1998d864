//! The one error kind of the framework.
//!
//! Validation failure is always a programmer- or upstream-data error
//! surfaced synchronously to the immediate caller. There is no
//! recoverable/retryable distinction and no aggregation: the first
//! offending value terminates validation.

use crate::value::Value;

const MAX_SUMMARY_CHARS: usize = 35;

/// Raised when a value fails the predicate of the runtime type being
/// applied.
///
/// The message leads with a short summary of the offending value; when the
/// summary cannot carry it (non-scalar, or a truncated scalar), the full
/// value is appended, rendered depth-unlimited.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct InvalidTypeError {
    message: String,

    /// The expected-type label of the runtime type that rejected the value.
    pub expected: String,

    /// The offending value, owned and un-truncated.
    pub given: Value,

    /// Position within the input sequence, for array entry points.
    pub at_index: Option<usize>,

    /// The entry-point method the value was passed to.
    pub via: Option<&'static str>,

    /// Optional hint on how to fix the input.
    pub suggestion: Option<String>,
}

impl InvalidTypeError {
    pub fn new(given: Value, expected: impl Into<String>) -> Self {
        let mut error = Self {
            message: String::new(),
            expected: expected.into(),
            given,
            at_index: None,
            via: None,
            suggestion: None,
        };
        error.message = error.render();
        error
    }

    /// Record the element index the failure occurred at.
    pub fn at_index(mut self, index: usize) -> Self {
        self.at_index = Some(index);
        self.message = self.render();
        self
    }

    /// Record the entry-point method name.
    pub fn via(mut self, method: &'static str) -> Self {
        self.via = Some(method);
        self.message = self.render();
        self
    }

    /// Attach a fix hint.
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self.message = self.render();
        self
    }

    fn render(&self) -> String {
        let (summary, truncated) = summarize(&self.given);

        let mut message = format!("expected {}, got {}", self.expected, summary);
        if let Some(index) = self.at_index {
            message.push_str(&format!(" at index {index}"));
        }
        if let Some(method) = self.via {
            message.push_str(&format!(" (via {method})"));
        }
        if let Some(suggestion) = &self.suggestion {
            message.push_str(&format!("\nsuggestion: {suggestion}"));
        }
        if truncated || !is_scalar(&self.given) {
            message.push_str(&format!("\nfull value:\n{}", self.given));
        }
        message
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// One-line summary of a value: label for containers, quoted/annotated
/// literal for scalars, truncated past [`MAX_SUMMARY_CHARS`].
fn summarize(value: &Value) -> (String, bool) {
    match value {
        Value::Null => ("null".to_string(), false),
        Value::Undefined => ("undefined".to_string(), false),
        Value::Object(_) => ("object".to_string(), false),
        Value::Array(_) => ("Array".to_string(), false),
        Value::Date(_) => ("Date".to_string(), false),
        Value::Bool(b) => (format!("{b} (boolean)"), false),
        Value::Number(n) => (format!("{n} (number)"), false),
        Value::String(s) => {
            if s.chars().count() > MAX_SUMMARY_CHARS {
                let cut: String = s.chars().take(MAX_SUMMARY_CHARS - 3).collect();
                (format!("\"{cut}...\""), true)
            } else {
                (format!("\"{s}\""), false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_message_is_one_line() {
        let error = InvalidTypeError::new(Value::from(true), "0 or 1");
        insta::assert_snapshot!(error.to_string(), @"expected 0 or 1, got true (boolean)");
    }

    #[test]
    fn index_and_method_parts() {
        let error = InvalidTypeError::new(Value::from("x"), "number")
            .at_index(2)
            .via("from_all");
        insta::assert_snapshot!(
            error.to_string(),
            @r#"expected number, got "x" at index 2 (via from_all)"#
        );
    }

    #[test]
    fn long_strings_truncate_and_append_full_value() {
        let long = "a".repeat(40);
        let error = InvalidTypeError::new(Value::from(long.clone()), "Date");
        let message = error.to_string();
        assert!(message.contains(&format!("\"{}...\"", "a".repeat(32))));
        assert!(message.contains(&format!("full value:\n\"{long}\"")));
    }

    #[test]
    fn containers_append_full_value() {
        let error = InvalidTypeError::new(
            Value::object([("id", Value::from(1))]),
            "{id: string}",
        );
        let message = error.to_string();
        assert!(message.starts_with("expected {id: string}, got object"));
        assert!(message.contains("full value:\n{\n  id: 1,\n}"));
    }

    #[test]
    fn suggestion_line() {
        let error =
            InvalidTypeError::new(Value::Null, "number").suggest("use or_null for nullable rows");
        assert!(
            error
                .to_string()
                .contains("suggestion: use or_null for nullable rows")
        );
    }
}
