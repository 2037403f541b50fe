//! Free-form producers
//!
//! A [`CustomRule`] receives the whole instance and a fresh outcome and may
//! record any failures it likes. It suits reusable validators for primitive
//! values, where a rule chain would be overkill.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Outcome, Producer, ProducerKind};

type Check<T> = Box<dyn Fn(&T, &mut Outcome) + Send + Sync>;

/// A producer backed by a closure writing into its own outcome.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::combinators::CustomRule;
/// use flowcheck_validator::foundation::{Failure, Producer};
///
/// let rule = CustomRule::new("username", |name: &str, outcome| {
///     if name.len() < 3 {
///         outcome.add_failure(Failure::for_property("username", "Username is too short"));
///     }
/// });
///
/// assert!(rule.produce("ada").is_valid());
/// assert!(!rule.produce("al").is_valid());
/// ```
pub struct CustomRule<T: ?Sized> {
    label: Cow<'static, str>,
    check: Check<T>,
}

impl<T: ?Sized> CustomRule<T> {
    /// Creates a producer from a label and a check.
    pub fn new<F>(label: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&T, &mut Outcome) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            check: Box::new(check),
        }
    }
}

impl<T: ?Sized> Producer<T> for CustomRule<T> {
    fn produce(&self, instance: &T) -> Outcome {
        let mut outcome = Outcome::new();
        (self.check)(instance, &mut outcome);
        outcome.set_skip_remaining(false);
        outcome
    }

    fn kind(&self) -> ProducerKind {
        ProducerKind::Custom
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<T: ?Sized> fmt::Debug for CustomRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
