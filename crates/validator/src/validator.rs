//! Validators and their builder
//!
//! A [`Validator`] owns an ordered list of producers (rule chains, nested,
//! collection, registry and custom links) and folds their outcomes into one
//! [`Outcome`] per call. It is immutable once built and can serve
//! concurrent `validate()` calls.
//!
//! Validators are assembled with a [`ValidatorBuilder`]. Registration order
//! is evaluation order, and failures always come back in that order, also
//! when producers run on the rayon pool.
//!
//! # Examples
//!
//! ```
//! use flowcheck_validator::prelude::*;
//!
//! #[derive(Debug)]
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! let mut builder = Validator::<User>::builder();
//! builder
//!     .rule_for("name", |u: &User| u.name.as_str())
//!     .not_empty()
//!     .with_message("Name is required");
//! builder.rule_for("age", |u: &User| &u.age).in_range(18, 60);
//! let validator = builder.build().unwrap();
//!
//! let outcome = validator.validate(&User { name: String::new(), age: 70 });
//! let rendered: Vec<_> = outcome.failures().iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     rendered,
//!     [
//!         "name - [NotEmpty]: Name is required",
//!         "age - [InRange]: 'age' must be between 18 and 60.",
//!     ]
//! );
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::chain::RuleChain;
use crate::combinators::{CollectionLink, CustomRule, Elements, NestedLink, RegistryLink};
use crate::foundation::{ConfigError, Outcome, Producer, Validate, ValidatorConfig};

// ============================================================================
// VALIDATOR
// ============================================================================

/// Evaluates every producer and returns their outcomes in registration
/// order.
type FanOut<T> = fn(&[Box<dyn Producer<T>>], &T) -> Vec<Outcome>;

/// Validator for instances of `T`.
pub struct Validator<T: ?Sized + 'static> {
    name: Cow<'static, str>,
    producers: Vec<Box<dyn Producer<T>>>,
    config: ValidatorConfig,
    fan_out: Option<FanOut<T>>,
}

impl<T: ?Sized + 'static> Validator<T> {
    /// Starts a builder named after `T`.
    pub fn builder() -> ValidatorBuilder<T> {
        ValidatorBuilder::new()
    }

    /// Name used in tracing spans.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execution settings.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Number of registered producers.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Labels of the registered producers in evaluation order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.producers.iter().map(|producer| producer.label())
    }

    /// Runs every producer against `instance` and merges their outcomes in
    /// registration order.
    ///
    /// Evaluation never stops early across producers. A panicking plain
    /// predicate propagates to the caller.
    pub fn validate(&self, instance: &T) -> Outcome {
        let span = tracing::debug_span!(
            "validate",
            validator = %self.name,
            producers = self.producers.len()
        );
        let _entered = span.enter();

        let mut outcome = Outcome::new();
        for (producer, sub) in self.producers.iter().zip(self.run(instance)) {
            if !sub.is_valid() {
                tracing::debug!(
                    kind = %producer.kind(),
                    label = producer.label(),
                    failures = sub.len(),
                    "producer failed"
                );
            }
            outcome.merge(sub);
        }

        outcome
    }

    /// One sub-outcome per producer, index-aligned with `self.producers`.
    fn run(&self, instance: &T) -> Vec<Outcome> {
        if let Some(fan_out) = self.fan_out
            && self.config.fans_out(self.producers.len())
        {
            return fan_out(&self.producers, instance);
        }

        self.producers
            .iter()
            .map(|producer| produce(producer.as_ref(), instance))
            .collect()
    }
}

/// Runs producers on the rayon pool. The span of the calling thread is
/// re-entered on each worker.
#[cfg(feature = "parallel")]
fn fan_out<T: ?Sized + Sync>(producers: &[Box<dyn Producer<T>>], instance: &T) -> Vec<Outcome> {
    use rayon::prelude::*;

    let span = tracing::Span::current();
    producers
        .par_iter()
        .map(|producer| {
            let _entered = span.enter();
            produce(producer.as_ref(), instance)
        })
        .collect()
}

fn produce<T: ?Sized>(producer: &dyn Producer<T>, instance: &T) -> Outcome {
    tracing::trace!(kind = %producer.kind(), label = producer.label(), "running producer");
    producer.produce(instance)
}

impl<T: ?Sized + 'static> Validate for Validator<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Outcome {
        Validator::validate(self, input)
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field(
                "producers",
                &self
                    .producers
                    .iter()
                    .map(|producer| format!("{}:{}", producer.kind(), producer.label()))
                    .collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Registers producers for a [`Validator`].
///
/// Registration methods record the first configuration error instead of
/// failing immediately; [`build`](Self::build) reports it.
pub struct ValidatorBuilder<T: ?Sized + 'static> {
    name: Cow<'static, str>,
    producers: Vec<Box<dyn Producer<T>>>,
    config: ValidatorConfig,
    fan_out: Option<FanOut<T>>,
    error: Option<ConfigError>,
}

impl<T: ?Sized + 'static> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> ValidatorBuilder<T> {
    /// Creates an empty builder named after `T`.
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<T>()),
            producers: Vec::new(),
            config: ValidatorConfig::default(),
            fan_out: None,
            error: None,
        }
    }

    /// Sets the name used in tracing spans.
    pub fn named(&mut self, name: impl Into<Cow<'static, str>>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Starts a rule chain for one property.
    ///
    /// The returned handle derefs to the [`RuleChain`]; the chain is
    /// registered when the handle is dropped, normally at the end of the
    /// statement.
    pub fn rule_for<P, F>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        accessor: F,
    ) -> ChainHandle<'_, T, P>
    where
        P: fmt::Debug + ?Sized + 'static,
        F: Fn(&T) -> &P + Send + Sync + 'static,
    {
        ChainHandle {
            builder: self,
            chain: Some(RuleChain::new(property, accessor)),
        }
    }

    /// Registers an already built rule chain.
    pub fn add_chain<P: ?Sized + 'static>(&mut self, mut chain: RuleChain<T, P>) -> &mut Self {
        if let Some(error) = chain.take_error() {
            self.record(error);
        }
        self.push(Box::new(chain))
    }

    /// Delegates an optional sub-object to `validator`.
    ///
    /// An absent sub-object contributes nothing.
    pub fn nested<V, F>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
    ) -> &mut Self
    where
        V: Validate + 'static,
        F: Fn(&T) -> Option<&V::Input> + Send + Sync + 'static,
    {
        let property = self.label(property);
        self.push(Box::new(NestedLink::new(property, selector, validator)))
    }

    /// Runs an independent validator against a property.
    pub fn registry<V, F>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
    ) -> &mut Self
    where
        V: Validate + 'static,
        F: Fn(&T) -> &V::Input + Send + Sync + 'static,
    {
        let property = self.label(property);
        self.push(Box::new(RegistryLink::new(property, selector, validator)))
    }

    /// Validates every element of a collection after mapping it through
    /// `item`.
    ///
    /// The selector borrows any container whose reference iterates the
    /// elements (`Vec`, slices, `VecDeque`, sets, `LinkedList`, `Option`).
    /// Failures are relabeled `"Element {n}: {message}"` with the 1-based
    /// source position.
    pub fn collection<S, C, V, F, G>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
        item: G,
    ) -> &mut Self
    where
        S: ?Sized + 'static,
        for<'a> &'a S: IntoIterator<Item = &'a C>,
        C: 'static,
        V: Validate + 'static,
        F: Fn(&T) -> &S + Send + Sync + 'static,
        G: Fn(&C) -> &V::Input + Send + Sync + 'static,
    {
        let property = self.label(property);
        self.push(Box::new(CollectionLink::new(property, selector, validator, item)))
    }

    /// Like [`collection`](Self::collection), but the selector yields the
    /// elements itself, for sources such as map values or filtered views.
    ///
    /// The iterator is consumed once per validation.
    pub fn collection_iter<C, V, F, G>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
        item: G,
    ) -> &mut Self
    where
        C: 'static,
        V: Validate + 'static,
        F: for<'a> Fn(&'a T) -> Elements<'a, C> + Send + Sync + 'static,
        G: Fn(&C) -> &V::Input + Send + Sync + 'static,
    {
        let property = self.label(property);
        self.push(Box::new(CollectionLink::from_elements(property, selector, validator, item)))
    }

    /// Validates every element of a collection as is.
    pub fn each<S, C, V, F>(
        &mut self,
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
    ) -> &mut Self
    where
        S: ?Sized + 'static,
        for<'a> &'a S: IntoIterator<Item = &'a C>,
        C: 'static,
        V: Validate<Input = C> + 'static,
        F: Fn(&T) -> &S + Send + Sync + 'static,
    {
        let property = self.label(property);
        self.push(Box::new(CollectionLink::each(property, selector, validator)))
    }

    /// Registers a closure that writes failures directly.
    pub fn custom<F>(&mut self, label: impl Into<Cow<'static, str>>, check: F) -> &mut Self
    where
        F: Fn(&T, &mut Outcome) + Send + Sync + 'static,
    {
        let label = self.label(label);
        self.push(Box::new(CustomRule::new(label, check)))
    }

    /// Number of producers registered so far.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Returns true when nothing is registered yet.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Finishes the validator.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] recorded during registration.
    pub fn build(self) -> Result<Validator<T>, ConfigError> {
        if let Some(error) = self.error {
            tracing::warn!(validator = %self.name, %error, "rejecting validator configuration");
            return Err(error);
        }

        tracing::debug!(
            validator = %self.name,
            producers = self.producers.len(),
            execution = ?self.config.execution,
            "validator built"
        );

        Ok(Validator {
            name: self.name,
            producers: self.producers,
            config: self.config,
            fan_out: self.fan_out,
        })
    }

    fn push(&mut self, producer: Box<dyn Producer<T>>) -> &mut Self {
        self.producers.push(producer);
        self
    }

    fn label(&mut self, label: impl Into<Cow<'static, str>>) -> Cow<'static, str> {
        let label = label.into();
        if label.trim().is_empty() {
            self.record(ConfigError::EmptyPropertyName);
        }
        label
    }

    fn record(&mut self, error: ConfigError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl<T: ?Sized + Sync + 'static> ValidatorBuilder<T> {
    /// Sets the execution settings.
    ///
    /// Parallel execution shares the instance across rayon workers, so it
    /// needs `T: Sync`. Without a call to `config` the validator runs
    /// sequentially, whatever `T` is.
    pub fn config(&mut self, config: ValidatorConfig) -> &mut Self {
        #[cfg(feature = "parallel")]
        {
            self.fan_out = Some(fan_out::<T>);
        }
        self.config = config;
        self
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ValidatorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("name", &self.name)
            .field("producers", &self.producers.len())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CHAIN HANDLE
// ============================================================================

/// A rule chain under construction.
///
/// Derefs to [`RuleChain`], so every rule and customization method is
/// available. Dropping the handle registers the chain with its builder.
pub struct ChainHandle<'a, T: ?Sized + 'static, P: ?Sized + 'static> {
    builder: &'a mut ValidatorBuilder<T>,
    chain: Option<RuleChain<T, P>>,
}

impl<T: ?Sized + 'static, P: ?Sized + 'static> Deref for ChainHandle<'_, T, P> {
    type Target = RuleChain<T, P>;

    fn deref(&self) -> &RuleChain<T, P> {
        self.chain.as_ref().expect("chain handle used after drop")
    }
}

impl<T: ?Sized + 'static, P: ?Sized + 'static> DerefMut for ChainHandle<'_, T, P> {
    fn deref_mut(&mut self) -> &mut RuleChain<T, P> {
        self.chain.as_mut().expect("chain handle used after drop")
    }
}

impl<T: ?Sized + 'static, P: ?Sized + 'static> Drop for ChainHandle<'_, T, P> {
    fn drop(&mut self) {
        if let Some(chain) = self.chain.take() {
            self.builder.add_chain(chain);
        }
    }
}

impl<T: ?Sized + 'static, P: ?Sized + 'static> fmt::Debug for ChainHandle<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHandle")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
