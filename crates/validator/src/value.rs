//! Field values and extraction
//!
//! A rule never sees the whole subject. It sees the [`FieldValue`] pulled out
//! of the subject for the rule's field specifier: either one value or, for a
//! grouped rule, one slot per member name.
//!
//! "Missing" always means the key is absent (or the subject itself is).
//! JSON `null` is a present value.

use serde_json::Value;

use crate::rule::{FieldSpec, Rule};

// ============================================================================
// FIELD VALUE
// ============================================================================

/// The value (or values) a rule's checks run against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// The field is not present in the subject.
    Missing,
    /// A single field's value.
    Single(&'a Value),
    /// The members of a grouped rule, in the rule's name order.
    ///
    /// Absent members are `None`.
    Group(Vec<Option<&'a Value>>),
}

impl<'a> FieldValue<'a> {
    /// Returns `true` if the field is absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the single value, if this is a present single field.
    #[must_use]
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string slice of a present single string field.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Returns the group members, or an empty slice for non-group values.
    #[must_use]
    pub fn members(&self) -> &[Option<&'a Value>] {
        match self {
            Self::Group(members) => members,
            _ => &[],
        }
    }

    /// Returns the `index`-th group member if it is present.
    #[must_use]
    pub fn member(&self, index: usize) -> Option<&'a Value> {
        self.members().get(index).copied().flatten()
    }

    /// Generic emptiness test.
    ///
    /// Only non-empty strings, arrays and objects hold content: missing
    /// values, `null`, numbers and booleans are empty. A group with at least
    /// one name is never empty, since it has a slot per member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Single(value) => is_empty_value(value),
            Self::Group(members) => members.is_empty(),
        }
    }

    /// Length as seen by the `len` check.
    ///
    /// Strings are measured in Unicode scalar values, arrays and groups in
    /// elements. Everything else has no length.
    #[must_use]
    pub fn observed_length(&self) -> Option<usize> {
        match self {
            Self::Missing => None,
            Self::Single(Value::String(s)) => Some(s.chars().count()),
            Self::Single(Value::Array(items)) => Some(items.len()),
            Self::Single(_) => None,
            Self::Group(members) => Some(members.len()),
        }
    }
}

/// Emptiness for a single JSON value.
///
/// Scalars carry no elements, so `null`, numbers and booleans are empty.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// JavaScript-style truthiness of a JSON value.
///
/// Used when a rule parameter expresses an intent rather than a typed flag
/// (`empty: 0` reads as `empty: false`).
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Looks up the value(s) a rule targets. Pure lookup, no validation.
///
/// A subject that is absent or is not an object yields missing values for
/// every name.
#[must_use]
pub fn extract<'a>(rule: &Rule, subject: Option<&'a Value>) -> FieldValue<'a> {
    match rule.field() {
        FieldSpec::Single(name) => {
            lookup(subject, name).map_or(FieldValue::Missing, FieldValue::Single)
        }
        FieldSpec::Group(names) => {
            FieldValue::Group(names.iter().map(|name| lookup(subject, name)).collect())
        }
    }
}

fn lookup<'a>(subject: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    subject.and_then(Value::as_object).and_then(|map| map.get(name))
}
