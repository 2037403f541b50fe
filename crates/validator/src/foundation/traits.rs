//! Core traits for the validation system
//!
//! [`Validate`] is the capability a whole validator exposes: one instance
//! in, one [`Outcome`] out. [`Producer`] is the unit a validator is built
//! from; rule chains and composition links all implement it.

use std::fmt;
use std::sync::Arc;

use super::outcome::Outcome;

// ============================================================================
// VALIDATE
// ============================================================================

/// A reusable validator for instances of `Input`.
///
/// Implementations hold no per-call state, so one instance can serve
/// concurrent calls on different inputs.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::foundation::{Failure, Outcome, Validate};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Outcome {
///         let mut outcome = Outcome::new();
///         if input.contains(' ') {
///             outcome.add_failure(Failure::new("must not contain spaces"));
///         }
///         outcome
///     }
/// }
///
/// assert!(NoSpaces.validate("alice").is_valid());
/// assert!(!NoSpaces.validate("al ice").is_valid());
/// ```
pub trait Validate: Send + Sync {
    /// The type being validated (may be unsized, e.g. `str`).
    type Input: ?Sized;

    /// Runs every rule against `input` and returns the aggregated outcome.
    fn validate(&self, input: &Self::Input) -> Outcome;
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }
}

// ============================================================================
// PRODUCER
// ============================================================================

/// What kind of registered unit a producer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProducerKind {
    /// Per-property rule chain.
    Chain,
    /// Delegation to a validator for a nested object.
    Nested,
    /// Per-element delegation over a collection.
    Collection,
    /// An independent validator reused for an already-covered property.
    Registry,
    /// Free-form producer writing failures directly.
    Custom,
}

impl fmt::Display for ProducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chain => "chain",
            Self::Nested => "nested",
            Self::Collection => "collection",
            Self::Registry => "registry",
            Self::Custom => "custom",
        })
    }
}

/// One registered unit of a validator.
///
/// Every call returns a fresh sub-outcome; the owning validator merges it.
pub trait Producer<T: ?Sized>: Send + Sync {
    /// Evaluates this producer against one instance.
    fn produce(&self, instance: &T) -> Outcome;

    /// Kind of producer, used for diagnostics.
    fn kind(&self) -> ProducerKind;

    /// Label of the property the producer covers.
    fn label(&self) -> &str;
}

// ============================================================================
// TESTS
// ============================================================================
