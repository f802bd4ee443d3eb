//! Check registry
//!
//! The checks for one rule are a flat, ordered list: the built-ins whose
//! parameter is set on the rule (in registry order), then the rule's custom
//! checks (in declaration order). A built-in whose parameter is absent is
//! never listed, so it can neither pass nor fail.

use smallvec::SmallVec;

use crate::rule::{PredicateFn, Rule};
use crate::value::FieldValue;

/// Built-in predicate signature.
pub type BuiltinFn = fn(&FieldValue<'_>, &Rule) -> bool;

/// How a check decides pass/fail.
#[derive(Clone, Copy)]
pub enum Predicate<'r> {
    /// A compiled-in check.
    Builtin(BuiltinFn),
    /// A caller-supplied check borrowed from the rule.
    Custom(&'r PredicateFn),
}

impl Predicate<'_> {
    /// Returns `true` if `value` passes.
    pub fn test(&self, value: &FieldValue<'_>, rule: &Rule) -> bool {
        match self {
            Self::Builtin(predicate) => predicate(value, rule),
            Self::Custom(predicate) => predicate(value, rule),
        }
    }
}

/// A named unit of validation.
#[derive(Clone, Copy)]
pub struct Check<'r> {
    /// Name used for message lookup and in per-check reports.
    pub name: &'r str,
    /// The pass/fail test.
    pub predicate: Predicate<'r>,
}

impl std::fmt::Debug for Check<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.predicate {
            Predicate::Builtin(_) => "builtin",
            Predicate::Custom(_) => "custom",
        };
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// A built-in check and the rule parameter that enables it.
struct Builtin {
    name: &'static str,
    applies: fn(&Rule) -> bool,
    predicate: BuiltinFn,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        applies: has_len,
        predicate: check_len,
    },
    Builtin {
        name: "empty",
        applies: has_empty,
        predicate: check_empty,
    },
];

fn has_len(rule: &Rule) -> bool {
    rule.len_bound().is_some()
}

fn has_empty(rule: &Rule) -> bool {
    rule.empty().is_some()
}

/// Names of the built-in checks, in evaluation order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// Builds the ordered check list for `rule`.
pub fn checks_for(rule: &Rule) -> SmallVec<[Check<'_>; 4]> {
    let builtins = BUILTINS
        .iter()
        .filter(|builtin| (builtin.applies)(rule))
        .map(|builtin| Check {
            name: builtin.name,
            predicate: Predicate::Builtin(builtin.predicate),
        });
    let custom = rule.custom().map(|(name, predicate)| Check {
        name,
        predicate: Predicate::Custom(predicate),
    });
    builtins.chain(custom).collect()
}

// ============================================================================
// BUILT-IN PREDICATES
// ============================================================================

/// `len: N` is a minimum, `len: [a, b]` an inclusive range. Any other
/// parameter shape, or a value without a length, fails.
fn check_len(value: &FieldValue<'_>, rule: &Rule) -> bool {
    match (rule.len_bound(), value.observed_length()) {
        (Some(bound), Some(length)) => bound.admits(length),
        _ => false,
    }
}

/// `empty: true` passes on empty values, `empty: false` on non-empty ones.
fn check_empty(value: &FieldValue<'_>, rule: &Rule) -> bool {
    let should_be_empty = rule.empty().unwrap_or(false);
    value.is_empty() == should_be_empty
}
