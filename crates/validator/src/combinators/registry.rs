//! Registry delegation
//!
//! A [`RegistryLink`] runs an independent, reusable validator against a
//! property that the main rule chain may already cover, such as a shared
//! username validator. It runs and merges like a nested link and does not
//! interact with the chain registered for the same property.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Outcome, Producer, ProducerKind, Validate};

type Selector<T, I> = Box<dyn Fn(&T) -> &I + Send + Sync>;

/// Applies a reusable validator to one property of `T`.
pub struct RegistryLink<T: ?Sized, V: Validate> {
    property: Cow<'static, str>,
    selector: Selector<T, V::Input>,
    validator: V,
}

impl<T: ?Sized, V: Validate> RegistryLink<T, V> {
    /// Creates a link from a label, a selector and a validator.
    pub fn new<F>(property: impl Into<Cow<'static, str>>, selector: F, validator: V) -> Self
    where
        F: Fn(&T) -> &V::Input + Send + Sync + 'static,
    {
        Self {
            property: property.into(),
            selector: Box::new(selector),
            validator,
        }
    }
}

impl<T: ?Sized, V: Validate> Producer<T> for RegistryLink<T, V> {
    fn produce(&self, instance: &T) -> Outcome {
        self.validator.validate((self.selector)(instance))
    }

    fn kind(&self) -> ProducerKind {
        ProducerKind::Registry
    }

    fn label(&self) -> &str {
        &self.property
    }
}

impl<T: ?Sized, V: Validate + fmt::Debug> fmt::Debug for RegistryLink<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLink")
            .field("property", &self.property)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
