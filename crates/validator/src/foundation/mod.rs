//! Core validation types and traits
//!
//! This module contains the leaf data and the seams everything else plugs
//! into:
//!
//! - **Data**: [`Failure`], [`Severity`], [`Outcome`], [`Rejection`]
//! - **Traits**: [`Validate`] (a whole validator), [`Producer`] (one
//!   registered unit of a validator)
//! - **Configuration**: [`ValidatorConfig`], [`ExecutionMode`], and the
//!   [`ConfigError`] raised for misconfigured rule sets
//!
//! # Error model
//!
//! Three kinds of "something went wrong" exist and they never mix:
//!
//! 1. A rule does not hold: recorded as a [`Failure`] in the [`Outcome`].
//! 2. Rules are misconfigured: [`ConfigError`] from
//!    [`ValidatorBuilder::build`](crate::validator::ValidatorBuilder::build).
//! 3. A plain predicate panics: the panic is not caught and propagates out
//!    of `validate()`.

pub mod config;
pub mod error;
pub mod failure;
pub mod outcome;
pub mod traits;

pub use config::{ExecutionMode, ValidatorConfig};
pub use error::ConfigError;
pub use failure::{Failure, Severity};
pub use outcome::{Outcome, Rejection};
pub use traits::{Producer, ProducerKind, Validate};
