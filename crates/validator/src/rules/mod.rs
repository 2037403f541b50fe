//! Built-in rules
//!
//! Every rule is a method on [`RuleChain`](crate::chain::RuleChain),
//! available when the property type supports it:
//!
//! | Module | Rules | Property bound |
//! |--------|-------|----------------|
//! | [`presence`] | `not_empty`, `required_if`, `required_when` | [`Blank`] |
//! | [`equality`] | `equals` | `PartialEq` |
//! | [`text`] | `contains`, `length`, `email`, `matches_regex`, `matches`, `no_consecutive_repeats`, `is_palindrome` | [`AsText`] |
//! | [`numeric`] | `in_range`, `greater_than`, `less_than` | `PartialOrd` |
//! | [`temporal`] | `date_in_future`, `date_in_past` | [`Temporal`] |
//! | [`collection`] | `unique` | [`DistinctElements`] |
//!
//! Failure codes are fixed per rule and can be replaced with
//! [`with_code`](crate::chain::RuleChain::with_code).

pub mod collection;
pub mod equality;
pub mod numeric;
pub mod presence;
pub mod temporal;
pub mod text;

pub use collection::DistinctElements;
pub use presence::Blank;
pub use temporal::Temporal;
pub use text::AsText;
