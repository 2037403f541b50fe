//! Prelude module for convenient imports.
//!
//! `use flowcheck_validator::prelude::*;` brings in the builder, the data
//! types a caller inspects, and the traits the built-in rules are resolved
//! through.
//!
//! # Examples
//!
//! ```
//! use flowcheck_validator::prelude::*;
//!
//! let mut builder = Validator::<String>::builder();
//! builder.rule_for("value", |s: &String| s.as_str()).is_palindrome();
//! let validator = builder.build().unwrap();
//!
//! assert!(validator.validate(&"Level".to_string()).is_valid());
//! ```

// ============================================================================
// FOUNDATION: Data, traits, configuration
// ============================================================================

pub use crate::foundation::{
    ConfigError, ExecutionMode, Failure, Outcome, Producer, ProducerKind, Rejection, Severity,
    Validate, ValidatorConfig,
};

// ============================================================================
// BUILDING: Validators, chains, links
// ============================================================================

pub use crate::chain::{Report, RuleChain};
pub use crate::combinators::{CollectionLink, CustomRule, Elements, NestedLink, RegistryLink};
pub use crate::validator::{ChainHandle, Validator, ValidatorBuilder};

// ============================================================================
// RULES: Value-kind traits
// ============================================================================

pub use crate::rules::{AsText, Blank, DistinctElements, Temporal};
