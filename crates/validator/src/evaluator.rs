//! Rule evaluation
//!
//! Runs one rule against its extracted value:
//!
//! 1. A missing field fails with `required` (or passes when not required),
//!    before any other check.
//! 2. A grouped rule with a missing member fails with `arrayMiss` when
//!    required, again before any other check.
//! 3. Otherwise the rule's checks run in registry order. `short` returns the
//!    first failure's message as-is; without it, failures are collected per
//!    check name, stopping at the first one when `findFirst` is set.

use indexmap::IndexMap;

use crate::message::{self, ARRAY_MISS, REQUIRED};
use crate::options::Options;
use crate::registry::checks_for;
use crate::report::FieldError;
use crate::rule::Rule;
use crate::value::FieldValue;

/// Key under which presence failures appear in per-check reports.
pub const IS_REQUIRED: &str = "isRequired";

/// Evaluates `rule` against `value`. `None` means the value is valid.
#[must_use]
pub fn evaluate(value: &FieldValue<'_>, rule: &Rule, options: Options) -> Option<FieldError> {
    if value.is_missing() {
        return options
            .required
            .then(|| presence_failure(REQUIRED, value, rule, options));
    }

    if options.required
        && rule.field().is_group()
        && value.members().iter().any(Option::is_none)
    {
        return Some(presence_failure(ARRAY_MISS, value, rule, options));
    }

    let mut failures = IndexMap::new();
    for check in checks_for(rule) {
        let passed = check.predicate.test(value, rule);
        tracing::trace!(field = %rule.field(), check = check.name, passed, "check evaluated");
        if passed {
            continue;
        }

        let message = message::resolve(check.name, value, rule);
        if options.short {
            return Some(FieldError::Message(message));
        }
        failures.insert(check.name.to_owned(), message);
        if options.find_first {
            break;
        }
    }

    (!failures.is_empty()).then_some(FieldError::Checks(failures))
}

fn presence_failure(
    check: &str,
    value: &FieldValue<'_>,
    rule: &Rule,
    options: Options,
) -> FieldError {
    let message = message::resolve(check, value, rule);
    if options.short {
        FieldError::Message(message)
    } else {
        FieldError::Checks(IndexMap::from([(IS_REQUIRED.to_owned(), message)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FULL: Options = Options {
        required: true,
        find_first: false,
        short: false,
    };

    fn checks(pairs: &[(&str, &str)]) -> FieldError {
        FieldError::Checks(
            pairs
                .iter()
                .map(|(check, message)| ((*check).to_owned(), (*message).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn missing_and_required() {
        let rule = Rule::new("nick").with_min_len(3);
        assert_eq!(
            evaluate(&FieldValue::Missing, &rule, Options::DEFAULT),
            Some(FieldError::from("Is required"))
        );
    }

    #[test]
    fn missing_and_optional() {
        let rule = Rule::new("nick").with_min_len(3);
        let options = Options {
            required: false,
            ..Options::DEFAULT
        };
        assert_eq!(evaluate(&FieldValue::Missing, &rule, options), None);
    }

    #[test]
    fn missing_in_full_mode_uses_is_required_key() {
        let rule = Rule::new("nick");
        assert_eq!(
            evaluate(&FieldValue::Missing, &rule, FULL),
            Some(checks(&[(IS_REQUIRED, "Is required")]))
        );
    }

    #[test]
    fn group_member_missing_short_circuits() {
        let rule = Rule::group(["from", "to"]).with_custom("never", |_, _| {
            panic!("checks must not run when a member is missing")
        });
        let zero = json!(0);
        let value = FieldValue::Group(vec![Some(&zero), None]);
        assert_eq!(
            evaluate(&value, &rule, Options::DEFAULT),
            Some(FieldError::from("Is required [to]"))
        );
    }

    #[test]
    fn group_member_missing_runs_checks_when_optional() {
        let rule = Rule::group(["from", "to"]).with_custom("both", |value, _| {
            value.members().iter().all(Option::is_some)
        });
        let zero = json!(0);
        let value = FieldValue::Group(vec![Some(&zero), None]);
        let options = Options {
            required: false,
            ..Options::DEFAULT
        };
        assert_eq!(evaluate(&value, &rule, options), Some(FieldError::from("Error")));
    }

    #[test]
    fn passing_value_has_no_error() {
        let rule = Rule::new("nick").with_len_range(4, 9).with_empty(false);
        let nick = json!("5text");
        assert_eq!(evaluate(&FieldValue::Single(&nick), &rule, FULL), None);
    }

    #[test]
    fn short_returns_first_failure_only() {
        let rule = Rule::new("nick")
            .with_min_len(10)
            .with_custom("alwaysFails", |_, _| false);
        let nick = json!("5text");
        assert_eq!(
            evaluate(&FieldValue::Single(&nick), &rule, Options::DEFAULT),
            Some(FieldError::from("Expected min 10 symbols. Given: 5"))
        );
    }

    #[test]
    fn find_first_stops_after_first_failure() {
        let rule = Rule::new("nick")
            .with_min_len(10)
            .with_custom("alwaysFails", |_, _| false);
        let nick = json!("5text");
        let options = Options {
            find_first: true,
            ..FULL
        };
        assert_eq!(
            evaluate(&FieldValue::Single(&nick), &rule, options),
            Some(checks(&[("len", "Expected min 10 symbols. Given: 5")]))
        );
    }

    #[test]
    fn full_mode_collects_every_failure() {
        let rule = Rule::new("nick")
            .with_min_len(10)
            .with_empty(true)
            .with_custom("alwaysPasses", |_, _| true)
            .with_custom("alwaysFails", |_, _| false)
            .with_message("alwaysFails", "Nope");
        let nick = json!("5text");
        assert_eq!(
            evaluate(&FieldValue::Single(&nick), &rule, FULL),
            Some(checks(&[
                ("len", "Expected min 10 symbols. Given: 5"),
                ("empty", "Is empty"),
                ("alwaysFails", "Nope"),
            ]))
        );
    }

    #[test]
    fn null_is_present_not_missing() {
        let rule = Rule::new("nick").with_empty(false);
        let null = json!(null);
        assert_eq!(
            evaluate(&FieldValue::Single(&null), &rule, Options::DEFAULT),
            Some(FieldError::from("Is empty"))
        );
    }
}
