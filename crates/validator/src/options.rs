//! Evaluation options
//!
//! Three flags steer one rule evaluation:
//!
//! - `required`: a missing field is an error (default `true`)
//! - `findFirst`: stop after the first failing check (default `true`)
//! - `short`: report a single message instead of a per-check map (default `true`)
//!
//! Each flag is resolved per rule: the rule's own value, else the call-level
//! value, else the default.

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// Call-level overrides, all optional.
///
/// Deserializes from the same camelCase keys the rules use:
///
/// ```
/// use validate_it::ValidateOptions;
///
/// let options: ValidateOptions = serde_json::from_str(r#"{"findFirst": false}"#).unwrap();
/// assert_eq!(options.find_first, Some(false));
/// assert_eq!(options.short, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateOptions {
    /// Overrides the `required` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Overrides the `findFirst` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find_first: Option<bool>,
    /// Overrides the `short` default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

impl ValidateOptions {
    /// No overrides.
    pub const NONE: Self = Self {
        required: None,
        find_first: None,
        short: None,
    };

    /// Creates options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::NONE
    }

    /// Sets `required`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets `findFirst`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_find_first(mut self, find_first: bool) -> Self {
        self.find_first = Some(find_first);
        self
    }

    /// Sets `short`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_short(mut self, short: bool) -> Self {
        self.short = Some(short);
        self
    }
}

/// The effective flags for one rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    /// A missing field is an error.
    pub required: bool,
    /// Stop after the first failing check.
    pub find_first: bool,
    /// Report one message rather than a per-check map.
    pub short: bool,
}

impl Options {
    /// Compiled-in defaults.
    pub const DEFAULT: Self = Self {
        required: true,
        find_first: true,
        short: true,
    };

    /// Resolves the flags for `rule`: rule ← call ← default.
    #[must_use]
    pub fn resolve(rule: &Rule, call: &ValidateOptions) -> Self {
        let pick = |own: Option<bool>, call: Option<bool>, default: bool| {
            own.or(call).unwrap_or(default)
        };
        Self {
            required: pick(rule.required(), call.required, Self::DEFAULT.required),
            find_first: pick(rule.find_first(), call.find_first, Self::DEFAULT.find_first),
            short: pick(rule.short(), call.short, Self::DEFAULT.short),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::DEFAULT
    }
}
