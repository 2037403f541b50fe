//! Collection rule: `unique`

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::chain::{FailureTemplate, RuleChain};

/// Sequences whose elements can be checked for duplicates.
pub trait DistinctElements {
    /// Returns true when no two elements are equal. Absent sequences count
    /// as distinct.
    fn all_distinct(&self) -> bool;
}

fn distinct<'a, E: Eq + Hash + 'a>(items: impl IntoIterator<Item = &'a E>) -> bool {
    let mut seen = HashSet::new();
    items.into_iter().all(|item| seen.insert(item))
}

impl<E: Eq + Hash> DistinctElements for [E] {
    fn all_distinct(&self) -> bool {
        distinct(self)
    }
}

impl<E: Eq + Hash> DistinctElements for Vec<E> {
    fn all_distinct(&self) -> bool {
        distinct(self)
    }
}

impl<E: Eq + Hash> DistinctElements for VecDeque<E> {
    fn all_distinct(&self) -> bool {
        distinct(self)
    }
}

impl<C: DistinctElements + ?Sized> DistinctElements for &C {
    fn all_distinct(&self) -> bool {
        (**self).all_distinct()
    }
}

impl<C: DistinctElements> DistinctElements for Option<C> {
    fn all_distinct(&self) -> bool {
        self.as_ref().is_none_or(DistinctElements::all_distinct)
    }
}

impl<T: ?Sized, P: DistinctElements + ?Sized> RuleChain<T, P> {
    /// Fails when the sequence holds two equal elements. Code `Unique`.
    pub fn unique(&mut self) -> &mut Self {
        let message = format!("'{}' must not contain duplicate elements.", self.property());
        self.push_predicate(
            "unique",
            FailureTemplate::with_message("Unique", message),
            |value: &P| value.all_distinct(),
        )
    }
}
