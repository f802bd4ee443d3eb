//! Ready-made predicates for custom checks
//!
//! The engine owns only `len` and `empty`. Anything else is a custom check,
//! and these are the common ones, already in the `(value, rule) -> bool`
//! shape [`Rule::with_custom`] expects.
//!
//! ```
//! use serde_json::json;
//! use validate_it::{Rule, predicates, validate_it};
//!
//! let rule = Rule::new("email")
//!     .with_custom("isEmail", predicates::email)
//!     .with_message("isEmail", "Invalid email");
//!
//! let report = validate_it(Some(&json!({"email": "aaa@"})), rule, None);
//! assert_eq!(report.get("email").and_then(|e| e.as_message()), Some("Invalid email"));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::rule::Rule;
use crate::value::FieldValue;

// The domain needs at least one dot.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

// ============================================================================
// STRING / VALUE TESTS
// ============================================================================

/// Returns `true` if `input` looks like an email address with a dotted domain.
#[must_use]
pub fn is_email(input: &str) -> bool {
    input.len() <= 254 && EMAIL_REGEX.is_match(input)
}

/// Returns `true` if `input` has no lowercase letters.
#[must_use]
pub fn is_uppercase(input: &str) -> bool {
    !input.chars().any(char::is_lowercase)
}

/// Returns `true` for integral JSON numbers and strings holding a decimal
/// integer.
#[must_use]
pub fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => {
            let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Returns `true` if `input` has at least `min` and, when given, at most
/// `max` Unicode scalar values.
#[must_use]
pub fn is_length(input: &str, min: usize, max: Option<usize>) -> bool {
    let length = input.chars().count();
    length >= min && max.is_none_or(|max| length <= max)
}

// ============================================================================
// CUSTOM-CHECK ADAPTERS
// ============================================================================

/// Custom check: the value is an email string.
pub fn email(value: &FieldValue<'_>, _rule: &Rule) -> bool {
    value.as_str().is_some_and(is_email)
}

/// Custom check: the value is a string without lowercase letters.
pub fn uppercase(value: &FieldValue<'_>, _rule: &Rule) -> bool {
    value.as_str().is_some_and(is_uppercase)
}

/// Custom check: the value is an integer.
pub fn integer(value: &FieldValue<'_>, _rule: &Rule) -> bool {
    value.as_value().is_some_and(is_int)
}
