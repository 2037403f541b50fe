//! Per-element delegation over a collection
//!
//! [`CollectionLink`] validates every element of a collection with one
//! validator. Each element failure is relabeled `"Element {n}: {message}"`,
//! where `n` is the 1-based source position; property, attempted value,
//! code and severity are kept. The source is enumerated exactly once per
//! call, so lazy iterators work as well as owned containers.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Outcome, Producer, ProducerKind, Validate};

/// Elements of a collection, in source order.
pub type Elements<'a, C> = Box<dyn Iterator<Item = &'a C> + 'a>;

type ElementSelector<T, C> = Box<dyn for<'a> Fn(&'a T) -> Elements<'a, C> + Send + Sync>;
type ItemSelector<C, I> = Box<dyn Fn(&C) -> &I + Send + Sync>;

/// Validates each element of a collection held by `T`.
///
/// `C` is the source element type; the item selector maps it to the shape
/// the validator accepts. Positions always refer to the source order.
pub struct CollectionLink<T: ?Sized, C, V: Validate> {
    property: Cow<'static, str>,
    selector: ElementSelector<T, C>,
    item: ItemSelector<C, V::Input>,
    validator: V,
}

impl<T: ?Sized, C, V: Validate> CollectionLink<T, C, V> {
    /// Creates a link over any iterator of elements, for example
    /// `|o| Box::new(o.by_sku.values())`.
    pub fn from_elements<F, G>(
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
        item: G,
    ) -> Self
    where
        F: for<'a> Fn(&'a T) -> Elements<'a, C> + Send + Sync + 'static,
        G: Fn(&C) -> &V::Input + Send + Sync + 'static,
    {
        Self {
            property: property.into(),
            selector: Box::new(selector),
            item: Box::new(item),
            validator,
        }
    }

    /// Creates a link over a borrowed container (`Vec`, slice, `VecDeque`,
    /// `HashSet`, `BTreeSet`, `LinkedList`, `Option`, ...).
    pub fn new<S, F, G>(
        property: impl Into<Cow<'static, str>>,
        selector: F,
        validator: V,
        item: G,
    ) -> Self
    where
        S: ?Sized + 'static,
        for<'a> &'a S: IntoIterator<Item = &'a C>,
        F: Fn(&T) -> &S + Send + Sync + 'static,
        G: Fn(&C) -> &V::Input + Send + Sync + 'static,
    {
        Self::from_elements(
            property,
            move |instance| Box::new(selector(instance).into_iter()),
            validator,
            item,
        )
    }
}

impl<T: ?Sized, C: 'static, V> CollectionLink<T, C, V>
where
    V: Validate<Input = C>,
{
    /// Creates a link that validates the elements themselves.
    pub fn each<S, F>(property: impl Into<Cow<'static, str>>, selector: F, validator: V) -> Self
    where
        S: ?Sized + 'static,
        for<'a> &'a S: IntoIterator<Item = &'a C>,
        F: Fn(&T) -> &S + Send + Sync + 'static,
    {
        Self::new(property, selector, validator, identity::<C>)
    }
}

fn identity<C>(element: &C) -> &C {
    element
}

impl<T: ?Sized, C, V: Validate> Producer<T> for CollectionLink<T, C, V> {
    fn produce(&self, instance: &T) -> Outcome {
        let mut outcome = Outcome::new();

        for (index, element) in (self.selector)(instance).enumerate() {
            let position = index + 1;
            let element_outcome = self.validator.validate((self.item)(element));
            if element_outcome.is_valid() {
                continue;
            }

            tracing::trace!(
                property = %self.property,
                position,
                failures = element_outcome.len(),
                "collection element failed"
            );

            if element_outcome.is_empty() {
                outcome.set_valid(false);
            }
            outcome.extend(element_outcome.failures().iter().map(|failure| {
                failure.relabeled(format!("Element {position}: {}", failure.message()))
            }));
        }

        outcome
    }

    fn kind(&self) -> ProducerKind {
        ProducerKind::Collection
    }

    fn label(&self) -> &str {
        &self.property
    }
}

impl<T: ?Sized, C, V: Validate + fmt::Debug> fmt::Debug for CollectionLink<T, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionLink")
            .field("property", &self.property)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
