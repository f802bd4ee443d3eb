//! # validate-it
//!
//! Declarative field-rule validation for plain JSON objects.
//!
//! A [`Rule`] names a field (or a group of fields), the checks to run on it
//! and, optionally, the messages to report. [`validate_it`] runs a list of
//! rules against a subject and returns an [`ErrorReport`] holding one entry
//! per failed field.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use validate_it::prelude::*;
//!
//! let rules = vec![
//!     Rule::new("nick").with_len_range(4, 9),
//!     Rule::group(["from", "to"])
//!         .with_custom("validInterval", |value, _| {
//!             let from = value.member(0).and_then(|v| v.as_i64());
//!             let to = value.member(1).and_then(|v| v.as_i64());
//!             matches!((from, to), (Some(from), Some(to)) if from < to)
//!         })
//!         .with_message("validInterval", "Invalid interval"),
//! ];
//!
//! let subject = json!({"nick": "3xt", "from": 100, "to": 0});
//! let report = validate_it(Some(&subject), rules, None);
//!
//! assert_eq!(
//!     serde_json::to_value(&report).unwrap(),
//!     json!({
//!         "nick": "Expected [4,9] symbols. Given: 3",
//!         "from": "Invalid interval",
//!         "to": "Invalid interval"
//!     })
//! );
//! ```
//!
//! ## Checks
//!
//! - **Built-in**: `len` (minimum or inclusive range, in symbols) and
//!   `empty` (`true` demands an empty value, `false` a non-empty one).
//!   A built-in runs only when its parameter is set on the rule.
//! - **Custom**: any `(value, rule) -> bool` closure, run after the
//!   built-ins in declaration order. See [`predicates`] for common ones.
//!
//! ## Options
//!
//! `required`, `findFirst` and `short` default to `true` and can be
//! overridden per call ([`ValidateOptions`]) or per rule.

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod message;
pub mod options;
pub mod predicates;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod rule;
pub mod value;

pub use engine::{RuleSet, validate, validate_it};
pub use error::RuleError;
pub use message::MessageSource;
pub use options::{Options, ValidateOptions};
pub use report::{ErrorReport, FieldError};
pub use rule::{FieldSpec, LenBound, Rule};
pub use value::FieldValue;
