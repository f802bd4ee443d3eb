//! Validation output
//!
//! An [`ErrorReport`] maps field identifiers to what went wrong with them.
//! A field that passed every check has no entry at all.
//!
//! The report serializes to the plain shape callers expect:
//!
//! ```json
//! { "nick": "Expected [4,9] symbols. Given: 3", "x": { "empty": "Is empty" } }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rule::FieldSpec;

/// The error recorded for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldError {
    /// A single message (short mode).
    Message(String),
    /// Failed check name to message, in evaluation order.
    Checks(IndexMap<String, String>),
}

impl FieldError {
    /// The message, if this is a short-mode error.
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Checks(_) => None,
        }
    }

    /// The per-check messages, if this is a full-mode error.
    #[must_use]
    pub fn as_checks(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Message(_) => None,
            Self::Checks(checks) => Some(checks),
        }
    }

    /// Every message carried by this error.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        let (single, many) = match self {
            Self::Message(message) => (Some(message.as_str()), None),
            Self::Checks(checks) => (None, Some(checks.values().map(String::as_str))),
        };
        single.into_iter().chain(many.into_iter().flatten())
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

/// Per-field validation errors, in the order fields first failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport {
    fields: IndexMap<String, FieldError>,
}

impl ErrorReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }

    /// Returns `true` if `field` has an error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates `(field, error)` pairs.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldError> {
        self.fields.iter()
    }

    /// Consumes the report, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, FieldError> {
        self.fields
    }

    /// Records `error` under every name of `field`.
    ///
    /// An existing entry is overwritten in place, so the last rule to fail a
    /// field wins while the field keeps its original position.
    pub(crate) fn record(&mut self, field: &FieldSpec, error: FieldError) {
        if let [names @ .., last] = field.names() {
            for name in names {
                self.fields.insert(name.clone(), error.clone());
            }
            self.fields.insert(last.clone(), error);
        }
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = (&'a String, &'a FieldError);
    type IntoIter = indexmap::map::Iter<'a, String, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for ErrorReport {
    type Item = (String, FieldError);
    type IntoIter = indexmap::map::IntoIter<String, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// One line per field (`field: message`) or per failed check
/// (`field.check: message`).
impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (field, error) in &self.fields {
            match error {
                FieldError::Message(message) => {
                    write!(f, "{sep}{field}: {message}")?;
                    sep = "\n";
                }
                FieldError::Checks(checks) => {
                    for (check, message) in checks {
                        write!(f, "{sep}{field}.{check}: {message}")?;
                        sep = "\n";
                    }
                }
            }
        }
        Ok(())
    }
}
