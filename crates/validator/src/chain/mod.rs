//! Per-property rule chains
//!
//! A [`RuleChain`] binds an ordered list of rules to one property accessor.
//! It is built once, when the owning validator is constructed, and then
//! evaluated against many instances. Evaluation keeps no state on the
//! chain: everything a run needs lives in the [`Outcome`] it returns.
//!
//! # Entry kinds
//!
//! - **Predicate**: a pure check over the property value.
//! - **Contextual**: a check that also sees the whole instance and the
//!   in-progress outcome; used for guards such as
//!   [`required_when`](RuleChain::required_when) and [`when`](RuleChain::when).
//! - **Should**: a user action that reports failure through its return
//!   value ([`should`](RuleChain::should)) or a callback
//!   ([`should_report`](RuleChain::should_report)).
//!
//! # Customization
//!
//! [`with_message`](RuleChain::with_message),
//! [`with_code`](RuleChain::with_code) and
//! [`with_severity`](RuleChain::with_severity) adjust the most recently
//! added rule only. Calling them before any rule is a configuration error
//! reported by the validator builder.

mod should;

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{ConfigError, Failure, Outcome, Producer, ProducerKind, Severity};

pub use should::Report;

// ============================================================================
// RULE ENTRIES
// ============================================================================

/// Message, code and severity a failing entry reports.
#[derive(Debug, Clone)]
pub(crate) struct FailureTemplate {
    message: Option<Cow<'static, str>>,
    code: Cow<'static, str>,
    severity: Severity,
}

impl FailureTemplate {
    /// Template with a code and the chain's default message.
    pub(crate) fn new(code: &'static str) -> Self {
        Self {
            message: None,
            code: Cow::Borrowed(code),
            severity: Severity::Error,
        }
    }

    /// Template with a code and a specific message.
    pub(crate) fn with_message(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(code)
        }
    }
}

pub(crate) type Predicate<P> = Box<dyn Fn(&P) -> bool + Send + Sync>;
pub(crate) type Contextual<T, P> = Box<dyn Fn(&T, &P, &mut Outcome) -> bool + Send + Sync>;
pub(crate) type ShouldAction<P> = Box<dyn Fn(&P) -> Result<(), String> + Send + Sync>;
pub(crate) type ReportAction<P> = Box<dyn Fn(&P, &mut Report) + Send + Sync>;

pub(crate) enum RuleKind<T: ?Sized, P: ?Sized> {
    Predicate(Predicate<P>),
    Contextual(Contextual<T, P>),
    Should(ShouldAction<P>),
    Report(ReportAction<P>),
}

pub(crate) struct RuleEntry<T: ?Sized, P: ?Sized> {
    rule: &'static str,
    kind: RuleKind<T, P>,
    template: FailureTemplate,
}

// ============================================================================
// RULE CHAIN
// ============================================================================

/// Ordered rules bound to one property of `T`.
///
/// Chains are usually created through
/// [`ValidatorBuilder::rule_for`](crate::validator::ValidatorBuilder::rule_for),
/// but can be built standalone and evaluated directly.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::chain::RuleChain;
///
/// struct User { name: String }
///
/// let mut chain = RuleChain::new("name", |u: &User| u.name.as_str());
/// chain.not_empty().with_message("Name is empty").length(3, 10);
///
/// let outcome = chain.evaluate(&User { name: String::new() }).unwrap();
/// let messages: Vec<_> = outcome.failures().iter().map(|f| f.message()).collect();
/// assert_eq!(messages, ["Name is empty", "'name' must be between 3 and 10 characters long."]);
/// ```
pub struct RuleChain<T: ?Sized, P: ?Sized> {
    property: Cow<'static, str>,
    accessor: Box<dyn Fn(&T) -> &P + Send + Sync>,
    render: fn(&P) -> String,
    entries: Vec<RuleEntry<T, P>>,
    error: Option<ConfigError>,
}

impl<T: ?Sized, P: ?Sized> RuleChain<T, P> {
    /// Creates an empty chain for the property `property`.
    ///
    /// The label is used for failure records; the accessor extracts the
    /// value every rule of the chain sees.
    pub fn new<F>(property: impl Into<Cow<'static, str>>, accessor: F) -> Self
    where
        F: Fn(&T) -> &P + Send + Sync + 'static,
        P: fmt::Debug,
    {
        let property = property.into();
        let error = property
            .trim()
            .is_empty()
            .then_some(ConfigError::EmptyPropertyName);

        Self {
            property,
            accessor: Box::new(accessor),
            render: |value| format!("{value:?}"),
            entries: Vec::new(),
            error,
        }
    }

    /// Property label.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First configuration error recorded on this chain, if any.
    pub fn config_error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }

    // ------------------------------------------------------------------------
    // Generic rules
    // ------------------------------------------------------------------------

    /// Adds a custom predicate; `false` means failure.
    ///
    /// Fails with code `DefaultRule` and the default message unless
    /// customized. A predicate that panics is not caught.
    pub fn must<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.push_predicate("must", FailureTemplate::new("DefaultRule"), predicate)
    }

    /// Adds a predicate that also sees the whole instance and the
    /// in-progress outcome of this chain.
    ///
    /// The outcome may be used to stop the chain through
    /// [`Outcome::set_skip_remaining`] or to record extra failures.
    pub fn must_with<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&T, &P, &mut Outcome) -> bool + Send + Sync + 'static,
    {
        self.push_contextual("must_with", FailureTemplate::new("DefaultRule"), predicate)
    }

    /// Guards the rest of the chain: when `condition` is false, the
    /// remaining rules are skipped without a failure.
    pub fn when<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push_contextual(
            "when",
            FailureTemplate::new("Condition"),
            move |instance: &T, _value: &P, outcome: &mut Outcome| {
                if !condition(instance) {
                    outcome.set_skip_remaining(true);
                }
                true
            },
        )
    }

    // ------------------------------------------------------------------------
    // Customization of the most recent rule
    // ------------------------------------------------------------------------

    /// Replaces the failure message of the most recently added rule.
    pub fn with_message(&mut self, message: impl Into<Cow<'static, str>>) -> &mut Self {
        let message = message.into();
        self.customize_last("with_message", |template| template.message = Some(message))
    }

    /// Replaces the error code of the most recently added rule.
    pub fn with_code(&mut self, code: impl Into<Cow<'static, str>>) -> &mut Self {
        let code = code.into();
        self.customize_last("with_code", |template| template.code = code)
    }

    /// Replaces the severity of the most recently added rule.
    pub fn with_severity(&mut self, severity: Severity) -> &mut Self {
        self.customize_last("with_severity", |template| template.severity = severity)
    }

    fn customize_last(
        &mut self,
        method: &'static str,
        apply: impl FnOnce(&mut FailureTemplate),
    ) -> &mut Self {
        match self.entries.last_mut() {
            Some(entry) => apply(&mut entry.template),
            None => self.record(ConfigError::DanglingCustomization {
                property: self.property.clone(),
                method,
            }),
        }
        self
    }

    // ------------------------------------------------------------------------
    // Registration plumbing shared with the built-in rule modules
    // ------------------------------------------------------------------------

    pub(crate) fn push_predicate<F>(
        &mut self,
        rule: &'static str,
        template: FailureTemplate,
        predicate: F,
    ) -> &mut Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.push(rule, RuleKind::Predicate(Box::new(predicate)), template)
    }

    pub(crate) fn push_contextual<F>(
        &mut self,
        rule: &'static str,
        template: FailureTemplate,
        predicate: F,
    ) -> &mut Self
    where
        F: Fn(&T, &P, &mut Outcome) -> bool + Send + Sync + 'static,
    {
        self.push(rule, RuleKind::Contextual(Box::new(predicate)), template)
    }

    pub(crate) fn push(
        &mut self,
        rule: &'static str,
        kind: RuleKind<T, P>,
        template: FailureTemplate,
    ) -> &mut Self {
        self.entries.push(RuleEntry {
            rule,
            kind,
            template,
        });
        self
    }

    /// Keeps the first configuration error; later ones are usually fallout.
    pub(crate) fn record(&mut self, error: ConfigError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn invalid_argument(&mut self, rule: &'static str, reason: impl Into<String>) {
        self.record(ConfigError::InvalidArgument {
            property: self.property.clone(),
            rule,
            reason: reason.into(),
        });
    }

    pub(crate) fn take_error(&mut self) -> Option<ConfigError> {
        self.error.take()
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Runs every rule in registration order against one instance.
    ///
    /// The skip flag starts cleared for every evaluation, so a guard in one
    /// chain never affects another.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`ConfigError`] without running anything when a
    /// rule could not be configured. Such a rule is missing from the chain,
    /// so evaluating the rest would accept values it should reject.
    pub fn evaluate(&self, instance: &T) -> Result<Outcome, ConfigError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.run(instance)),
        }
    }

    fn run(&self, instance: &T) -> Outcome {
        let value = (self.accessor)(instance);
        let mut outcome = Outcome::new();
        outcome.set_skip_remaining(false);

        for (index, entry) in self.entries.iter().enumerate() {
            if outcome.skip_remaining() {
                tracing::trace!(
                    property = %self.property,
                    skipped = self.entries.len() - index,
                    "skipping remaining rules"
                );
                break;
            }

            tracing::trace!(
                property = %self.property,
                rule = entry.rule,
                position = index + 1,
                "evaluating rule"
            );

            match &entry.kind {
                RuleKind::Predicate(predicate) => {
                    if !predicate(value) {
                        outcome.add_failure(self.failure(&entry.template, value, None));
                    }
                }
                RuleKind::Contextual(predicate) => {
                    if !predicate(instance, value, &mut outcome) {
                        outcome.add_failure(self.failure(&entry.template, value, None));
                    }
                }
                RuleKind::Should(action) => {
                    if let Err(error) = action(value) {
                        outcome.add_failure(self.failure(&entry.template, value, Some(error)));
                    }
                }
                RuleKind::Report(action) => {
                    let mut report = Report::new();
                    action(value, &mut report);
                    for message in report.into_messages() {
                        outcome.add_failure(
                            self.base_failure(&entry.template, value)
                                .relabeled(message),
                        );
                    }
                }
            }
        }

        outcome.set_skip_remaining(false);
        outcome
    }

    /// Builds the failure for an entry. The template message wins, then the
    /// action's own error text, then the chain default.
    fn failure(&self, template: &FailureTemplate, value: &P, error: Option<String>) -> Failure {
        let message = match (&template.message, error) {
            (Some(message), _) => message.clone(),
            (None, Some(error)) if !error.trim().is_empty() => Cow::Owned(error),
            (None, Some(_)) => Cow::Borrowed("Custom validation failed."),
            (None, None) => Cow::Owned(self.default_message()),
        };
        self.base_failure(template, value).relabeled(message)
    }

    fn base_failure(&self, template: &FailureTemplate, value: &P) -> Failure {
        Failure::for_property(self.property.clone(), "")
            .with_attempted_value((self.render)(value))
            .with_code(template.code.clone())
            .with_severity(template.severity)
    }

    fn default_message(&self) -> String {
        format!("Validation failed for property '{}'.", self.property)
    }
}

// A chain registered through a builder hands its configuration error to the
// builder, so only a misconfigured chain used directly can reach the panic.
impl<T: ?Sized, P: ?Sized> Producer<T> for RuleChain<T, P> {
    fn produce(&self, instance: &T) -> Outcome {
        self.evaluate(instance)
            .unwrap_or_else(|error| panic!("misconfigured rule chain: {error}"))
    }

    fn kind(&self) -> ProducerKind {
        ProducerKind::Chain
    }

    fn label(&self) -> &str {
        &self.property
    }
}

impl<T: ?Sized, P: ?Sized> fmt::Debug for RuleChain<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("property", &self.property)
            .field(
                "rules",
                &self.entries.iter().map(|entry| entry.rule).collect::<Vec<_>>(),
            )
            .field("accessor", &"<function>")
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
