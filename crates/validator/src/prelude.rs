//! Prelude module for convenient imports.
//!
//! Provides a single `use validate_it::prelude::*;` import that brings in
//! the rule builder, the entry points and the report types.
//!
//! # Examples
//!
//! ```
//! use validate_it::prelude::*;
//! use serde_json::json;
//!
//! let rules = [
//!     Rule::new("username").with_len_range(3, 20),
//!     Rule::new("email").with_required(false).with_custom("isEmail", predicates::email),
//! ];
//! let report = validate(Some(&json!({"username": "vladko"})), &rules, &ValidateOptions::NONE);
//! assert!(report.is_empty());
//! ```

// ============================================================================
// RULES & OPTIONS
// ============================================================================

pub use crate::options::{Options, ValidateOptions};
pub use crate::rule::{FieldSpec, LenBound, Rule};

// ============================================================================
// EVALUATION
// ============================================================================

pub use crate::engine::{RuleSet, validate, validate_it};
pub use crate::message::MessageSource;
pub use crate::predicates;
pub use crate::value::FieldValue;

// ============================================================================
// OUTPUT
// ============================================================================

pub use crate::error::RuleError;
pub use crate::report::{ErrorReport, FieldError};
