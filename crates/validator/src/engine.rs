//! Validation orchestration
//!
//! Walks the rule list in order. Each rule gets its options resolved, its
//! value extracted, and is evaluated. Failures are recorded under the
//! rule's field name, or under every name of a grouped rule.

use serde_json::Value;

use crate::evaluator::evaluate;
use crate::options::{Options, ValidateOptions};
use crate::report::ErrorReport;
use crate::rule::Rule;
use crate::value::extract;

// ============================================================================
// RULE SET
// ============================================================================

/// Normalized rule input for [`validate_it`].
///
/// One rule and a list of rules are both accepted. So is loosely typed JSON:
/// anything that is not a rule object or a list of rule objects becomes
/// [`RuleSet::Malformed`], which validates to an empty report.
#[derive(Debug, Clone)]
pub enum RuleSet {
    /// Rules to evaluate, in order.
    Rules(Vec<Rule>),
    /// Input that was not rule-shaped.
    Malformed,
}

impl RuleSet {
    /// The rules to evaluate. Empty for malformed input.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        match self {
            Self::Rules(rules) => rules,
            Self::Malformed => &[],
        }
    }

    /// Returns `true` if the input was not rule-shaped.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        Self::Rules(vec![rule])
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::Rules(rules)
    }
}

impl From<&[Rule]> for RuleSet {
    fn from(rules: &[Rule]) -> Self {
        Self::Rules(rules.to_vec())
    }
}

impl<const N: usize> From<[Rule; N]> for RuleSet {
    fn from(rules: [Rule; N]) -> Self {
        Self::Rules(rules.into())
    }
}

impl From<&Value> for RuleSet {
    fn from(value: &Value) -> Self {
        match Rule::list_from_json(value) {
            Ok(rules) => Self::Rules(rules),
            Err(error) => {
                tracing::debug!(%error, "ignoring malformed rules");
                Self::Malformed
            }
        }
    }
}

impl From<Value> for RuleSet {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates `subject` against `rules`.
///
/// `subject` may be absent, in which case every targeted field is missing.
/// Later rules overwrite earlier entries for the same field.
#[must_use]
pub fn validate(
    subject: Option<&Value>,
    rules: &[Rule],
    options: &ValidateOptions,
) -> ErrorReport {
    let mut report = ErrorReport::new();

    for rule in rules {
        let resolved = Options::resolve(rule, options);
        let value = extract(rule, subject);
        let Some(error) = evaluate(&value, rule, resolved) else {
            continue;
        };

        tracing::debug!(field = %rule.field(), "field failed validation");
        report.record(rule.field(), error);
    }

    report
}

/// Validates `subject` against one rule, a rule list, or rule-shaped JSON.
///
/// Malformed rule input is not an error: it yields an empty report.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validate_it::{Rule, validate_it};
///
/// let subject = json!({"nick": "3xt"});
/// let report = validate_it(Some(&subject), Rule::new("nick").with_len_range(4, 9), None);
/// assert_eq!(
///     serde_json::to_value(&report).unwrap(),
///     json!({"nick": "Expected [4,9] symbols. Given: 3"})
/// );
///
/// // Not a rule at all.
/// assert!(validate_it(Some(&subject), &json!(557), None).is_empty());
/// ```
#[must_use]
pub fn validate_it(
    subject: Option<&Value>,
    rules: impl Into<RuleSet>,
    options: Option<&ValidateOptions>,
) -> ErrorReport {
    let rules = rules.into();
    validate(subject, rules.rules(), options.unwrap_or(&ValidateOptions::NONE))
}
