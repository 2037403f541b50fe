//! Presence rules: `not_empty`, `required_if` and `required_when`

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::chain::{FailureTemplate, RuleChain};
use crate::foundation::Outcome;

// ============================================================================
// BLANK
// ============================================================================

/// Values that can be absent, empty or blank.
///
/// Text is blank when it is empty or whitespace only; containers when they
/// hold nothing; `Option` when it is `None` or holds a blank value. Numbers,
/// booleans, characters and dates are never blank.
pub trait Blank {
    /// Returns true when the value counts as missing.
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl Blank for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl Blank for Box<str> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<B: Blank + ?Sized> Blank for &B {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<B: Blank> Blank for Option<B> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Blank::is_blank)
    }
}

impl<E> Blank for [E] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<E> Blank for Vec<E> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<E> Blank for VecDeque<E> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Blank for HashMap<K, V, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<E, S> Blank for HashSet<E, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<E> Blank for BTreeSet<E> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! never_blank {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Blank for $ty {
                fn is_blank(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_blank!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    chrono::NaiveDate, chrono::NaiveDateTime, chrono::NaiveTime,
);

impl<Tz: chrono::TimeZone> Blank for chrono::DateTime<Tz> {
    fn is_blank(&self) -> bool {
        false
    }
}

// ============================================================================
// RULES
// ============================================================================

impl<T: ?Sized, P: Blank + ?Sized> RuleChain<T, P> {
    /// Fails when the value is blank.
    ///
    /// Code `NotEmpty`.
    pub fn not_empty(&mut self) -> &mut Self {
        let message = format!("'{}' must not be empty.", self.property());
        self.push_predicate(
            "not_empty",
            FailureTemplate::with_message("NotEmpty", message),
            |value: &P| !value.is_blank(),
        )
    }

    /// Requires a non-blank value only when `condition` holds for the
    /// value itself.
    ///
    /// When the condition is false the property is exempt: this rule passes
    /// and the rest of the chain is skipped. Code `Required`.
    pub fn required_if<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.push_required("required_if", move |_: &T, value: &P| condition(value))
    }

    /// Like [`required_if`](Self::required_if), but the condition looks at
    /// the whole instance, e.g. another field.
    pub fn required_when<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push_required("required_when", move |instance: &T, _: &P| condition(instance))
    }

    fn push_required<F>(&mut self, rule: &'static str, applies: F) -> &mut Self
    where
        F: Fn(&T, &P) -> bool + Send + Sync + 'static,
    {
        let message = format!("'{}' is required.", self.property());
        self.push_contextual(
            rule,
            FailureTemplate::with_message("Required", message),
            move |instance: &T, value: &P, outcome: &mut Outcome| {
                if applies(instance, value) {
                    !value.is_blank()
                } else {
                    outcome.set_skip_remaining(true);
                    true
                }
            },
        )
    }
}
