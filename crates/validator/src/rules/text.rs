//! Text rules
//!
//! Lengths count Unicode scalar values, not bytes. An absent value (`None`)
//! fails the rules that demand something of the text (`contains`,
//! `length`, `email`, the regex rules) and passes the ones that only forbid
//! something (`no_consecutive_repeats`, `is_palindrome`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::chain::{FailureTemplate, RuleChain};
use crate::foundation::ConfigError;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Run length at which `no_consecutive_repeats` fails by default.
pub const DEFAULT_MAX_REPEATS: usize = 3;

// ============================================================================
// AS TEXT
// ============================================================================

/// Property types that can be viewed as text.
pub trait AsText {
    /// The text, or `None` when the value is absent.
    fn as_text(&self) -> Option<&str>;
}

impl AsText for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsText for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl AsText for Cow<'_, str> {
    fn as_text(&self) -> Option<&str> {
        Some(&**self)
    }
}

impl AsText for Box<str> {
    fn as_text(&self) -> Option<&str> {
        Some(&**self)
    }
}

impl<S: AsText + ?Sized> AsText for &S {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

impl<S: AsText> AsText for Option<S> {
    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(AsText::as_text)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;

    for c in text.chars() {
        current = if previous == Some(c) { current + 1 } else { 1 };
        longest = longest.max(current);
        previous = Some(c);
    }

    longest
}

fn is_palindrome(text: &str) -> bool {
    let folded: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    folded.iter().eq(folded.iter().rev())
}

// ============================================================================
// RULES
// ============================================================================

impl<T: ?Sized, P: AsText + ?Sized> RuleChain<T, P> {
    /// Fails unless the text contains `needle`. Code `Contains`.
    pub fn contains(&mut self, needle: impl Into<Cow<'static, str>>) -> &mut Self {
        let needle = needle.into();
        let message = format!("'{}' must contain '{needle}'.", self.property());
        self.push_predicate(
            "contains",
            FailureTemplate::with_message("Contains", message),
            move |value: &P| value.as_text().is_some_and(|text| text.contains(&*needle)),
        )
    }

    /// Fails unless the character count is within `min..=max`. Code `Length`.
    ///
    /// `min > max` is a configuration error.
    pub fn length(&mut self, min: usize, max: usize) -> &mut Self {
        if min > max {
            self.invalid_argument("length", format!("min {min} is greater than max {max}"));
            return self;
        }

        let message = format!(
            "'{}' must be between {min} and {max} characters long.",
            self.property()
        );
        self.push_predicate(
            "length",
            FailureTemplate::with_message("Length", message),
            move |value: &P| {
                value
                    .as_text()
                    .is_some_and(|text| (min..=max).contains(&text.chars().count()))
            },
        )
    }

    /// Fails unless the text looks like `local@domain.tld`. Code `Email`.
    pub fn email(&mut self) -> &mut Self {
        let message = format!("'{}' is not a valid email address.", self.property());
        self.push_predicate(
            "email",
            FailureTemplate::with_message("Email", message),
            |value: &P| value.as_text().is_some_and(|text| EMAIL_REGEX.is_match(text)),
        )
    }

    /// Compiles `pattern` and fails unless the text matches it. Code `Regex`.
    ///
    /// A pattern that does not compile is a configuration error.
    pub fn matches_regex(&mut self, pattern: &str) -> &mut Self {
        match Regex::new(pattern) {
            Ok(regex) => self.matches(regex),
            Err(source) => {
                let error = ConfigError::InvalidPattern {
                    property: self.property().to_string().into(),
                    pattern: pattern.to_string(),
                    source,
                };
                self.record(error);
                self
            }
        }
    }

    /// Fails unless the text matches an already compiled regex. Code `Regex`.
    pub fn matches(&mut self, regex: Regex) -> &mut Self {
        let message = format!("'{}' is not in the correct format.", self.property());
        self.push_predicate(
            "matches",
            FailureTemplate::with_message("Regex", message),
            move |value: &P| value.as_text().is_some_and(|text| regex.is_match(text)),
        )
    }

    /// Fails when any character repeats [`DEFAULT_MAX_REPEATS`] or more
    /// times in a row. Code `NoConsecutiveRepeats`.
    pub fn no_consecutive_repeats(&mut self) -> &mut Self {
        self.no_consecutive_repeats_of(DEFAULT_MAX_REPEATS)
    }

    /// Fails when any character repeats `max` or more times in a row.
    ///
    /// `max < 2` is a configuration error.
    pub fn no_consecutive_repeats_of(&mut self, max: usize) -> &mut Self {
        if max < 2 {
            self.invalid_argument("no_consecutive_repeats", format!("run limit {max} is below 2"));
            return self;
        }

        let message = format!(
            "'{}' must not repeat a character {max} or more times in a row.",
            self.property()
        );
        self.push_predicate(
            "no_consecutive_repeats",
            FailureTemplate::with_message("NoConsecutiveRepeats", message),
            move |value: &P| value.as_text().is_none_or(|text| longest_run(text) < max),
        )
    }

    /// Fails unless the text reads the same backwards, ignoring case.
    /// Code `Palindrome`.
    pub fn is_palindrome(&mut self) -> &mut Self {
        let message = format!("'{}' must be a palindrome.", self.property());
        self.push_predicate(
            "is_palindrome",
            FailureTemplate::with_message("Palindrome", message),
            |value: &P| value.as_text().is_none_or(is_palindrome),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
