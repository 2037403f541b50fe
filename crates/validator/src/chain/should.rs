//! Free-form "should" rules
//!
//! Two flavours exist. [`RuleChain::should`] takes an action returning
//! `Result`; an `Err` becomes exactly one failure with code
//! `ShouldRuleException`. [`RuleChain::should_report`] hands the action a
//! [`Report`]; every message it records becomes one failure with code
//! `ShouldRule`.

use std::borrow::Cow;
use std::fmt;

use super::{FailureTemplate, RuleChain, RuleKind};

/// Collects failure messages from a [`should_report`](RuleChain::should_report) action.
#[derive(Debug, Default)]
pub struct Report {
    messages: Vec<Cow<'static, str>>,
}

impl Report {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one failure message.
    pub fn fail(&mut self, message: impl Into<Cow<'static, str>>) {
        self.messages.push(message.into());
    }

    /// Number of messages recorded so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn into_messages(self) -> Vec<Cow<'static, str>> {
        self.messages
    }
}

impl<T: ?Sized, P: ?Sized> RuleChain<T, P> {
    /// Adds an action that reports failure through its `Err` value.
    ///
    /// The failure message is the customized message if any, otherwise the
    /// error's `Display` text, otherwise `"Custom validation failed."`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowcheck_validator::chain::RuleChain;
    ///
    /// let mut chain = RuleChain::new("code", |s: &String| s.as_str());
    /// chain.should(|code: &str| code.parse::<u16>().map(|_| ()));
    ///
    /// let outcome = chain.evaluate(&"abc".to_string()).unwrap();
    /// assert_eq!(outcome.failures()[0].code(), Some("ShouldRuleException"));
    /// assert_eq!(outcome.failures()[0].message(), "invalid digit found in string");
    /// ```
    pub fn should<F, E>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&P) -> Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let action = move |value: &P| action(value).map_err(|error| error.to_string());
        self.push(
            "should",
            RuleKind::Should(Box::new(action)),
            FailureTemplate::new("ShouldRuleException"),
        )
    }

    /// Adds an action that records any number of failures through a
    /// [`Report`].
    ///
    /// Messages come from the action; a customized code or severity applies
    /// to each of them.
    pub fn should_report<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&P, &mut Report) + Send + Sync + 'static,
    {
        self.push(
            "should_report",
            RuleKind::Report(Box::new(action)),
            FailureTemplate::new("ShouldRule"),
        )
    }
}
