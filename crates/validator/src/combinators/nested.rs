//! Nested-object delegation
//!
//! [`NestedLink`] hands an optional sub-object to another validator and
//! returns that validator's outcome unchanged. An absent sub-object is not a
//! failure here; required-ness is expressed with a rule on the same
//! property.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Outcome, Producer, ProducerKind, Validate};

type OptionalSelector<T, I> = Box<dyn Fn(&T) -> Option<&I> + Send + Sync>;

/// Delegates an optional sub-object of `T` to a validator.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::combinators::NestedLink;
/// use flowcheck_validator::foundation::{Failure, Outcome, Producer, Validate};
///
/// struct Address { city: String }
/// struct User { address: Option<Address> }
///
/// struct AddressRules;
/// impl Validate for AddressRules {
///     type Input = Address;
///     fn validate(&self, input: &Address) -> Outcome {
///         input.city.is_empty()
///             .then(|| Failure::for_property("city", "City is required"))
///             .into_iter()
///             .collect()
///     }
/// }
///
/// let link = NestedLink::new("address", |u: &User| u.address.as_ref(), AddressRules);
/// assert!(link.produce(&User { address: None }).is_valid());
///
/// let outcome = link.produce(&User { address: Some(Address { city: String::new() }) });
/// assert_eq!(outcome.failures()[0].property(), Some("city"));
/// ```
pub struct NestedLink<T: ?Sized, V: Validate> {
    property: Cow<'static, str>,
    selector: OptionalSelector<T, V::Input>,
    validator: V,
}

impl<T: ?Sized, V: Validate> NestedLink<T, V> {
    /// Creates a link from a label, an optional selector and a validator.
    pub fn new<F>(property: impl Into<Cow<'static, str>>, selector: F, validator: V) -> Self
    where
        F: Fn(&T) -> Option<&V::Input> + Send + Sync + 'static,
    {
        Self {
            property: property.into(),
            selector: Box::new(selector),
            validator,
        }
    }

    /// Returns a reference to the delegated validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }
}

impl<T: ?Sized, V: Validate> Producer<T> for NestedLink<T, V> {
    fn produce(&self, instance: &T) -> Outcome {
        match (self.selector)(instance) {
            Some(nested) => self.validator.validate(nested),
            None => {
                tracing::trace!(property = %self.property, "nested value absent");
                Outcome::new()
            }
        }
    }

    fn kind(&self) -> ProducerKind {
        ProducerKind::Nested
    }

    fn label(&self) -> &str {
        &self.property
    }
}

impl<T: ?Sized, V: Validate + fmt::Debug> fmt::Debug for NestedLink<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedLink")
            .field("property", &self.property)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
