//! Rules: what to check on which field
//!
//! A [`Rule`] binds a [`FieldSpec`] to built-in constraint parameters
//! (`len`, `empty`), caller-supplied predicates, message overrides and
//! per-rule option overrides. Rules are immutable once built and cheap to
//! clone (predicates and computed messages sit behind `Arc`).
//!
//! # Examples
//!
//! ```
//! use validate_it::Rule;
//!
//! let nick = Rule::new("nick").with_len_range(4, 9);
//! let interval = Rule::group(["from", "to"])
//!     .with_custom("validInterval", |value, _rule| {
//!         let from = value.member(0).and_then(|v| v.as_f64());
//!         let to = value.member(1).and_then(|v| v.as_f64());
//!         matches!((from, to), (Some(from), Some(to)) if from < to)
//!     })
//!     .with_message("validInterval", "Invalid interval");
//! # let _ = (nick, interval);
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Result, RuleError, json_type};
use crate::message::MessageSource;
use crate::value::{FieldValue, is_truthy};

/// Signature of a custom check.
///
/// Returns `true` when the value passes.
pub type PredicateFn = dyn Fn(&FieldValue<'_>, &Rule) -> bool + Send + Sync;

// ============================================================================
// FIELD SPEC
// ============================================================================

/// The field identifier(s) a rule targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSpec {
    /// One field.
    Single(String),
    /// Several fields evaluated jointly; an error is reported on every one.
    Group(Vec<String>),
}

impl FieldSpec {
    /// The names errors are reported under, in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Group(names) => names,
        }
    }

    /// Returns `true` for a grouped field.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Group(names) => write!(f, "[{}]", names.join(",")),
        }
    }
}

// ============================================================================
// LEN BOUND
// ============================================================================

/// Parameter of the built-in `len` check.
#[derive(Debug, Clone, PartialEq)]
pub enum LenBound {
    /// Length must be at least this many symbols.
    Min(usize),
    /// Length must fall in `[min, max]`, both inclusive.
    Range(usize, usize),
    /// A parameter of any other shape. The check never passes.
    Invalid(Value),
}

impl LenBound {
    /// Decodes a JSON `len` parameter.
    ///
    /// Accepts a non-negative integer (or its decimal string) and a
    /// two-element array of them. Anything else becomes [`LenBound::Invalid`].
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        if let Some(min) = as_count(value) {
            return Self::Min(min);
        }
        if let Value::Array(items) = value
            && let [lo, hi] = items.as_slice()
            && let (Some(lo), Some(hi)) = (as_count(lo), as_count(hi))
        {
            return Self::Range(lo, hi);
        }
        Self::Invalid(value.clone())
    }

    /// Returns `true` if `length` satisfies the bound.
    #[must_use]
    pub fn admits(&self, length: usize) -> bool {
        match *self {
            Self::Min(min) => length >= min,
            Self::Range(min, max) => (min..=max).contains(&length),
            Self::Invalid(_) => false,
        }
    }
}

fn as_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A field-validation rule.
#[derive(Clone)]
pub struct Rule {
    field: FieldSpec,
    len: Option<LenBound>,
    empty: Option<bool>,
    required: Option<bool>,
    find_first: Option<bool>,
    short: Option<bool>,
    custom: IndexMap<String, Arc<PredicateFn>>,
    messages: IndexMap<String, MessageSource>,
}

impl Rule {
    /// Creates a rule for a single field.
    pub fn new(name: impl Into<String>) -> Self {
        Self::for_field(FieldSpec::Single(name.into()))
    }

    /// Creates a grouped rule over several fields.
    pub fn group<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::for_field(FieldSpec::Group(names.into_iter().map(Into::into).collect()))
    }

    /// Creates a rule for an explicit field spec.
    pub fn for_field(field: FieldSpec) -> Self {
        Self {
            field,
            len: None,
            empty: None,
            required: None,
            find_first: None,
            short: None,
            custom: IndexMap::new(),
            messages: IndexMap::new(),
        }
    }

    // ---- builders --------------------------------------------------------

    /// Sets the `len` parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_len(mut self, bound: LenBound) -> Self {
        self.len = Some(bound);
        self
    }

    /// Requires at least `min` symbols.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min_len(self, min: usize) -> Self {
        self.with_len(LenBound::Min(min))
    }

    /// Requires between `min` and `max` symbols, inclusive.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_len_range(self, min: usize, max: usize) -> Self {
        self.with_len(LenBound::Range(min, max))
    }

    /// Sets the `empty` parameter: `true` demands an empty value, `false` a
    /// non-empty one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_empty(mut self, empty: bool) -> Self {
        self.empty = Some(empty);
        self
    }

    /// Overrides `required` for this rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Overrides `findFirst` for this rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_find_first(mut self, find_first: bool) -> Self {
        self.find_first = Some(find_first);
        self
    }

    /// Overrides `short` for this rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_short(mut self, short: bool) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a custom check. Checks run in the order they were added.
    ///
    /// Re-using a name replaces the predicate but keeps its position.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &Rule) -> bool + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Overrides the message for a check (`len`, `empty`, `required`,
    /// `arrayMiss` or a custom check name).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(
        mut self,
        check: impl Into<String>,
        message: impl Into<MessageSource>,
    ) -> Self {
        self.messages.insert(check.into(), message.into());
        self
    }

    /// Overrides the message for a check with one computed from the value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message_fn<F>(self, check: impl Into<String>, message: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &Rule) -> String + Send + Sync + 'static,
    {
        self.with_message(check, MessageSource::computed(message))
    }

    // ---- accessors -------------------------------------------------------

    /// The targeted field(s).
    #[must_use]
    pub fn field(&self) -> &FieldSpec {
        &self.field
    }

    /// The `len` parameter, if set.
    #[must_use]
    pub fn len_bound(&self) -> Option<&LenBound> {
        self.len.as_ref()
    }

    /// The `empty` parameter, if set.
    #[must_use]
    pub fn empty(&self) -> Option<bool> {
        self.empty
    }

    /// Rule-level `required` override.
    #[must_use]
    pub fn required(&self) -> Option<bool> {
        self.required
    }

    /// Rule-level `findFirst` override.
    #[must_use]
    pub fn find_first(&self) -> Option<bool> {
        self.find_first
    }

    /// Rule-level `short` override.
    #[must_use]
    pub fn short(&self) -> Option<bool> {
        self.short
    }

    /// Custom checks in declaration order.
    pub fn custom(&self) -> impl Iterator<Item = (&str, &PredicateFn)> {
        self.custom
            .iter()
            .map(|(name, predicate)| (name.as_str(), predicate.as_ref()))
    }

    /// The message override for `check`, if any.
    #[must_use]
    pub fn message(&self, check: &str) -> Option<&MessageSource> {
        self.messages.get(check)
    }

    // ---- JSON ------------------------------------------------------------

    /// Decodes a rule from a JSON object.
    ///
    /// Reads `name`, `len`, `empty`, `required`, `findFirst`, `short` and
    /// the string entries of `msg`. A `msg` that is not an object is
    /// ignored. Custom checks cannot be expressed in JSON; add them with
    /// [`Rule::with_custom`] afterwards.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(RuleError::shape("a rule object", value));
        };

        let field = match map.get("name") {
            None => return Err(RuleError::MissingName),
            Some(Value::String(name)) => FieldSpec::Single(name.clone()),
            Some(Value::Array(names)) => FieldSpec::Group(
                names
                    .iter()
                    .map(|name| name.as_str().map(str::to_owned).ok_or(RuleError::InvalidName))
                    .collect::<Result<_>>()?,
            ),
            Some(_) => return Err(RuleError::InvalidName),
        };

        let mut rule = Self::for_field(field);
        rule.len = map.get("len").map(LenBound::from_json);
        rule.empty = map.get("empty").map(is_truthy);
        rule.required = flag(map, "required")?;
        rule.find_first = flag(map, "findFirst")?;
        rule.short = flag(map, "short")?;

        if let Some(Value::Object(messages)) = map.get("msg") {
            for (check, message) in messages {
                if let Value::String(text) = message {
                    rule.messages
                        .insert(check.clone(), MessageSource::from(text.clone()));
                }
            }
        }

        Ok(rule)
    }

    /// Decodes one rule object or an array of rule objects.
    pub fn list_from_json(value: &Value) -> Result<Vec<Self>> {
        match value {
            Value::Object(_) => Ok(vec![Self::from_json(value)?]),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Self::from_json(item).map_err(|source| RuleError::InvalidEntry {
                        index,
                        source: Box::new(source),
                    })
                })
                .collect(),
            other => Err(RuleError::shape(
                "a rule object or a list of rule objects",
                other,
            )),
        }
    }
}

fn flag(map: &Map<String, Value>, option: &'static str) -> Result<Option<bool>> {
    match map.get(option) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(RuleError::InvalidOption {
            option,
            found: json_type(other),
        }),
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("len", &self.len)
            .field("empty", &self.empty)
            .field("required", &self.required)
            .field("find_first", &self.find_first)
            .field("short", &self.short)
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .field("messages", &self.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(10), LenBound::Min(10))]
    #[case(json!("10"), LenBound::Min(10))]
    #[case(json!([4, 9]), LenBound::Range(4, 9))]
    #[case(json!([24, 24]), LenBound::Range(24, 24))]
    #[case(json!([1, 2, 3]), LenBound::Invalid(json!([1, 2, 3])))]
    #[case(json!(-1), LenBound::Invalid(json!(-1)))]
    #[case(json!(null), LenBound::Invalid(json!(null)))]
    fn len_bound_from_json(#[case] input: Value, #[case] expected: LenBound) {
        assert_eq!(LenBound::from_json(&input), expected);
    }

    #[test]
    fn len_bound_admits() {
        assert!(LenBound::Min(3).admits(3));
        assert!(!LenBound::Min(3).admits(2));
        assert!(LenBound::Range(4, 9).admits(9));
        assert!(!LenBound::Range(4, 9).admits(10));
        assert!(!LenBound::Invalid(json!("x")).admits(0));
    }

    #[test]
    fn from_json_single() {
        let rule = Rule::from_json(&json!({
            "name": "nick",
            "len": [4, 9],
            "empty": false,
            "short": false,
            "msg": {"len": "Bad length", "empty": 42}
        }))
        .unwrap();

        assert_eq!(rule.field(), &FieldSpec::Single("nick".into()));
        assert_eq!(rule.len_bound(), Some(&LenBound::Range(4, 9)));
        assert_eq!(rule.empty(), Some(false));
        assert_eq!(rule.short(), Some(false));
        assert_eq!(rule.required(), None);
        assert!(rule.message("len").is_some());
        assert!(rule.message("empty").is_none());
    }

    #[test]
    fn from_json_group() {
        let rule = Rule::from_json(&json!({"name": ["from", "to"]})).unwrap();
        assert_eq!(
            rule.field(),
            &FieldSpec::Group(vec!["from".into(), "to".into()])
        );
        assert_eq!(rule.field().to_string(), "[from,to]");
        assert!(rule.field().is_group());
        assert!(!Rule::new("from").field().is_group());
    }

    #[test]
    fn from_json_ignores_non_object_msg() {
        let rule = Rule::from_json(&json!({"name": "x", "msg": "oops"})).unwrap();
        assert!(rule.message("oops").is_none());
    }

    #[rstest]
    #[case(json!("String"), RuleError::InvalidShape { expected: "a rule object", found: "string" })]
    #[case(json!({}), RuleError::MissingName)]
    #[case(json!({"name": 5}), RuleError::InvalidName)]
    #[case(json!({"name": ["a", 1]}), RuleError::InvalidName)]
    #[case(json!({"name": "a", "required": "yes"}), RuleError::InvalidOption { option: "required", found: "string" })]
    fn from_json_rejects(#[case] input: Value, #[case] expected: RuleError) {
        assert_eq!(Rule::from_json(&input).unwrap_err(), expected);
    }

    #[test]
    fn list_from_json_reports_entry_index() {
        let err = Rule::list_from_json(&json!([{"name": "a"}, 3])).unwrap_err();
        assert!(matches!(err, RuleError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn list_from_json_accepts_single_object() {
        let rules = Rule::list_from_json(&json!({"name": "a"})).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn custom_checks_keep_declaration_order() {
        let rule = Rule::new("x")
            .with_custom("b", |_, _| true)
            .with_custom("a", |_, _| true)
            .with_custom("b", |_, _| false);
        let names: Vec<_> = rule.custom().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn rules_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rule>();
        assert_send_sync::<MessageSource>();
    }

    #[test]
    fn debug_hides_closures() {
        let rule = Rule::new("x").with_custom("isUpperCase", |_, _| true);
        let rendered = format!("{rule:?}");
        assert!(rendered.contains("isUpperCase"));
    }
}
