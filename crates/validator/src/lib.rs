//! # flowcheck-validator
//!
//! A fluent, rule-based validation engine for domain objects.
//!
//! ## Quick Start
//!
//! ```
//! use flowcheck_validator::prelude::*;
//!
//! #[derive(Debug)]
//! struct Signup {
//!     email: String,
//!     password: String,
//!     age: u8,
//! }
//!
//! let mut builder = Validator::<Signup>::builder();
//! builder
//!     .rule_for("email", |s: &Signup| s.email.as_str())
//!     .not_empty()
//!     .email()
//!     .with_message("Email is not valid");
//! builder
//!     .rule_for("password", |s: &Signup| s.password.as_str())
//!     .length(8, 64)
//!     .no_consecutive_repeats();
//! builder.rule_for("age", |s: &Signup| &s.age).in_range(18, 120);
//! let validator = builder.build().unwrap();
//!
//! let outcome = validator.validate(&Signup {
//!     email: "ada@example.com".into(),
//!     password: "correct horse".into(),
//!     age: 36,
//! });
//! assert!(outcome.is_valid());
//! ```
//!
//! ## Building blocks
//!
//! - [`chain::RuleChain`]: ordered rules for one property, with
//!   per-rule message, code and severity customization
//! - [`rules`]: built-in rules resolved by property type
//! - [`combinators`]: nested, collection, registry and custom producers
//! - [`validator::Validator`]: merges every producer's outcome in
//!   registration order, sequentially or on the rayon pool
//! - [`foundation`]: [`Outcome`](foundation::Outcome),
//!   [`Failure`](foundation::Failure), configuration and errors
//!
//! ## Logging
//!
//! The crate emits `tracing` events and spans and never installs a
//! subscriber. Spans are at `debug`, per-rule events at `trace`.

// Boxed accessor and rule closures are part of the registration API.
#![allow(clippy::type_complexity)]

pub mod chain;
pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod rules;
pub mod validator;
