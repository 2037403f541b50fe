//! Ordering rules: `in_range`, `greater_than`, `less_than`
//!
//! Work for any `PartialOrd` value. Incomparable values such as `NaN` fail.

use std::cmp::Ordering;
use std::fmt;

use crate::chain::{FailureTemplate, RuleChain};

impl<T: ?Sized, P> RuleChain<T, P>
where
    P: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    /// Fails unless `min <= value <= max`. Code `InRange`.
    ///
    /// `min > max` and bounds that do not compare (`NaN`) are configuration
    /// errors.
    pub fn in_range(&mut self, min: P, max: P) -> &mut Self {
        match min.partial_cmp(&max) {
            Some(Ordering::Greater) => {
                self.invalid_argument("in_range", format!("min {min} is greater than max {max}"));
                return self;
            }
            None => {
                self.invalid_argument("in_range", format!("bounds {min} and {max} do not compare"));
                return self;
            }
            Some(_) => {}
        }

        let message = format!("'{}' must be between {min} and {max}.", self.property());
        self.push_predicate(
            "in_range",
            FailureTemplate::with_message("InRange", message),
            move |value: &P| *value >= min && *value <= max,
        )
    }

    /// Fails unless `value > bound`. Code `GreaterThan`.
    pub fn greater_than(&mut self, bound: P) -> &mut Self {
        if !comparable(&bound) {
            self.invalid_argument("greater_than", format!("bound {bound} does not compare"));
            return self;
        }
        let message = format!("'{}' must be greater than {bound}.", self.property());
        self.push_predicate(
            "greater_than",
            FailureTemplate::with_message("GreaterThan", message),
            move |value: &P| *value > bound,
        )
    }

    /// Fails unless `value < bound`. Code `LessThan`.
    pub fn less_than(&mut self, bound: P) -> &mut Self {
        if !comparable(&bound) {
            self.invalid_argument("less_than", format!("bound {bound} does not compare"));
            return self;
        }
        let message = format!("'{}' must be less than {bound}.", self.property());
        self.push_predicate(
            "less_than",
            FailureTemplate::with_message("LessThan", message),
            move |value: &P| *value < bound,
        )
    }
}

fn comparable<P: PartialOrd>(value: &P) -> bool {
    value.partial_cmp(value).is_some()
}
