//! Message resolution for failed checks
//!
//! A failed check's message comes from, in order:
//!
//! 1. the rule's own override for that check name,
//! 2. the built-in default for that check name,
//! 3. the generic fallback, `"Error"`.
//!
//! Both overrides and defaults may be static text or computed from the
//! value and the rule.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::rule::{FieldSpec, LenBound, Rule};
use crate::value::FieldValue;

/// Check name used for a missing field.
pub const REQUIRED: &str = "required";

/// Check name used for a grouped rule with a missing member.
pub const ARRAY_MISS: &str = "arrayMiss";

/// Message used when nothing more specific exists.
pub const FALLBACK: &str = "Error";

/// Signature of a computed message.
pub type MessageFn = dyn Fn(&FieldValue<'_>, &Rule) -> String + Send + Sync;

// ============================================================================
// MESSAGE SOURCE
// ============================================================================

/// A message that is either literal or computed on demand.
#[derive(Clone)]
pub enum MessageSource {
    /// Returned verbatim.
    Static(Cow<'static, str>),
    /// Called with the failing value and its rule.
    Computed(Arc<MessageFn>),
}

impl MessageSource {
    /// Wraps a closure as a computed message.
    pub fn computed<F>(message: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &Rule) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(message))
    }

    /// Produces the message text.
    #[must_use]
    pub fn render(&self, value: &FieldValue<'_>, rule: &Rule) -> String {
        match self {
            Self::Static(text) => text.clone().into_owned(),
            Self::Computed(message) => message(value, rule),
        }
    }
}

impl From<&'static str> for MessageSource {
    fn from(text: &'static str) -> Self {
        Self::Static(Cow::Borrowed(text))
    }
}

impl From<String> for MessageSource {
    fn from(text: String) -> Self {
        Self::Static(Cow::Owned(text))
    }
}

impl fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(<function>)"),
        }
    }
}

// ============================================================================
// DEFAULTS
// ============================================================================

/// Built-in default for a check name.
#[derive(Clone, Copy)]
enum DefaultMessage {
    Static(&'static str),
    Computed(fn(&FieldValue<'_>, &Rule) -> String),
}

fn default_message(check: &str) -> Option<DefaultMessage> {
    let message = match check {
        REQUIRED => DefaultMessage::Static("Is required"),
        ARRAY_MISS => DefaultMessage::Computed(group_missing_message),
        "len" => DefaultMessage::Computed(len_message),
        "empty" => DefaultMessage::Static("Is empty"),
        _ => return None,
    };
    Some(message)
}

fn len_message(value: &FieldValue<'_>, rule: &Rule) -> String {
    let expected = match rule.len_bound() {
        Some(LenBound::Min(min)) => format!("Expected min {min} symbols."),
        Some(LenBound::Range(min, max)) => format!("Expected [{min},{max}] symbols."),
        Some(LenBound::Invalid(_)) | None => "Invalid len.".to_owned(),
    };
    match value.observed_length() {
        Some(given) => format!("{expected} Given: {given}"),
        None => format!("{expected} Given: n/a"),
    }
}

/// Lists the group members that are absent, in group order.
fn group_missing_message(value: &FieldValue<'_>, rule: &Rule) -> String {
    let missing: Vec<&str> = match rule.field() {
        FieldSpec::Group(names) => names
            .iter()
            .zip(value.members())
            .filter(|(_, member)| member.is_none())
            .map(|(name, _)| name.as_str())
            .collect(),
        FieldSpec::Single(name) => vec![name.as_str()],
    };
    format!("Is required [{}]", missing.join(","))
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Produces the message for a failed `check`.
#[must_use]
pub fn resolve(check: &str, value: &FieldValue<'_>, rule: &Rule) -> String {
    if let Some(source) = rule.message(check) {
        return source.render(value, rule);
    }
    match default_message(check) {
        Some(DefaultMessage::Static(text)) => text.to_owned(),
        Some(DefaultMessage::Computed(message)) => message(value, rule),
        None => FALLBACK.to_owned(),
    }
}
