//! Equality rule

use std::borrow::Borrow;
use std::fmt;

use crate::chain::{FailureTemplate, RuleChain};

impl<T: ?Sized, P: PartialEq + ?Sized> RuleChain<T, P> {
    /// Fails unless the value equals `expected`.
    ///
    /// `expected` may be any owned form of the property type, so a `&str`
    /// property compares against a `String`. Code `Equal`.
    pub fn equals<Q>(&mut self, expected: Q) -> &mut Self
    where
        Q: Borrow<P> + fmt::Debug + Send + Sync + 'static,
    {
        let message = format!("'{}' must be equal to {expected:?}.", self.property());
        self.push_predicate(
            "equals",
            FailureTemplate::with_message("Equal", message),
            move |value: &P| value == <Q as Borrow<P>>::borrow(&expected),
        )
    }
}
