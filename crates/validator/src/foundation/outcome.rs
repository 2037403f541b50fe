//! Per-run accumulator of failures
//!
//! One [`Outcome`] is created for every validation call, including the
//! sub-runs of nested and collection links before they are merged. It is
//! owned by the run that created it; mutation goes through `&mut self`, so
//! exclusive access is checked at compile time rather than behind a lock.

use serde::Serialize;

use super::failure::{Failure, Severity};

// ============================================================================
// OUTCOME
// ============================================================================

/// The structured result of one validation call.
///
/// Invariant: once a failure is added the outcome is invalid, and it can
/// never be marked valid again while failures are present.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::foundation::{Failure, Outcome};
///
/// let mut outcome = Outcome::new();
/// assert!(outcome.is_valid());
///
/// outcome.add_failure(Failure::for_property("name", "Name is empty"));
/// outcome.set_valid(true); // ignored: failures are present
///
/// assert!(!outcome.is_valid());
/// assert_eq!(outcome.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    is_valid: bool,
    #[serde(skip)]
    skip_remaining: bool,
    failures: Vec<Failure>,
}

impl Outcome {
    /// Creates a valid, empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_valid: true,
            skip_remaining: false,
            failures: Vec::new(),
        }
    }

    /// Creates an outcome holding the given failures.
    pub fn with_failures(failures: impl IntoIterator<Item = Failure>) -> Self {
        let mut outcome = Self::new();
        outcome.extend(failures);
        outcome
    }

    /// Returns true when no failure was recorded and the outcome was not
    /// explicitly marked invalid.
    pub fn is_valid(&self) -> bool {
        self.is_valid && self.failures.is_empty()
    }

    /// Marks the outcome valid or invalid.
    ///
    /// Setting `true` while failures are present has no effect.
    pub fn set_valid(&mut self, valid: bool) {
        self.is_valid = valid && self.failures.is_empty();
    }

    /// Whether the current rule chain should stop evaluating entries.
    ///
    /// Only meaningful inside one chain evaluation; it is never carried
    /// across a merge.
    pub fn skip_remaining(&self) -> bool {
        self.skip_remaining
    }

    /// Sets the chain-local skip flag.
    pub fn set_skip_remaining(&mut self, skip: bool) {
        self.skip_remaining = skip;
    }

    /// Records a failure and marks the outcome invalid.
    pub fn add_failure(&mut self, failure: Failure) {
        self.is_valid = false;
        self.failures.push(failure);
    }

    /// Records several failures in order.
    pub fn extend(&mut self, failures: impl IntoIterator<Item = Failure>) {
        for failure in failures {
            self.add_failure(failure);
        }
    }

    /// Folds a sub-outcome into this one.
    ///
    /// A valid sub-outcome contributes nothing. An invalid one appends its
    /// failures in order and marks this outcome invalid, even when it holds
    /// no failures. The sub-outcome's skip flag is dropped.
    pub fn merge(&mut self, other: Outcome) {
        if other.is_valid() {
            return;
        }
        self.is_valid = false;
        self.failures.extend(other.failures);
    }

    /// Failures in evaluation order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes the outcome and returns its failures.
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Failures recorded for one property.
    pub fn failures_for<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures
            .iter()
            .filter(move |failure| failure.property() == Some(property))
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true when no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true when at least one failure is at or above `min`.
    pub fn has_blocking(&self, min: Severity) -> bool {
        self.failures.iter().any(|failure| failure.severity() >= min)
    }

    /// Converts to a `Result`, rejecting on any failure.
    pub fn into_result(self) -> Result<(), Rejection> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Rejection::new(self.failures))
        }
    }

    /// Converts to a `Result`, rejecting only when a failure reaches `min`.
    ///
    /// An outcome explicitly marked invalid without failures is rejected
    /// regardless of `min`. The rejection carries every failure, blocking
    /// or not.
    pub fn into_result_at(self, min: Severity) -> Result<(), Rejection> {
        let marked_invalid = !self.is_valid && self.failures.is_empty();
        if marked_invalid || self.has_blocking(min) {
            Err(Rejection::new(self.failures))
        } else {
            Ok(())
        }
    }

    /// Renders the outcome as the JSON body a request adapter returns.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "isValid": self.is_valid(),
            "failures": self.failures,
        })
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Failure> for Outcome {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self::with_failures(iter)
    }
}

// ============================================================================
// REJECTION
// ============================================================================

/// Error returned by [`Outcome::into_result`] when validation did not pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} failure(s)", .failures.len())]
pub struct Rejection {
    failures: Vec<Failure>,
}

impl Rejection {
    /// Creates a rejection from a failure list.
    pub fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    /// Failures in evaluation order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes the rejection and returns its failures.
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

// ============================================================================
// TESTS
// ============================================================================
