//! Error types for rule decoding
//!
//! Validation failures are never errors: they are the data in an
//! [`ErrorReport`](crate::ErrorReport). The only fallible operation in the
//! crate is turning loosely typed JSON into [`Rule`](crate::Rule)s.

use thiserror::Error;

/// Result type for rule decoding.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Reasons a JSON value could not be decoded into rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The value has the wrong JSON type.
    #[error("expected {expected}, got {found}")]
    InvalidShape {
        /// What the decoder wanted
        expected: &'static str,
        /// The JSON type it saw
        found: &'static str,
    },

    /// The rule object has no `name` key.
    #[error("rule has no `name`")]
    MissingName,

    /// `name` is neither a string nor a list of strings.
    #[error("rule `name` must be a string or a list of strings")]
    InvalidName,

    /// An option flag is not a boolean.
    #[error("option `{option}` must be a boolean, got {found}")]
    InvalidOption {
        /// The option key
        option: &'static str,
        /// The JSON type it saw
        found: &'static str,
    },

    /// One entry of a rule list failed to decode.
    #[error("rule #{index} is invalid: {source}")]
    InvalidEntry {
        /// Position in the list
        index: usize,
        /// Why it failed
        #[source]
        source: Box<RuleError>,
    },
}

impl RuleError {
    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::InvalidShape {
            expected,
            found: json_type(found),
        }
    }
}

/// Human-readable JSON type name, for error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn shape_error_message() {
        let err = RuleError::shape("a rule object", &json!(557));
        assert_eq!(err.to_string(), "expected a rule object, got number");
    }

    #[test]
    fn entry_error_keeps_source() {
        let err = RuleError::InvalidEntry {
            index: 2,
            source: Box::new(RuleError::MissingName),
        };
        assert_eq!(err.to_string(), "rule #2 is invalid: rule has no `name`");
        assert!(std::error::Error::source(&err).is_some());
    }
}
