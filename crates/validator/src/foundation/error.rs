//! Configuration errors
//!
//! Misconfigured rule sets are rejected when the validator is built, never
//! deferred to `validate()`. Rule failures are not errors; they are
//! [`Failure`](super::Failure) records.

use std::borrow::Cow;

/// A programmer mistake detected while registering rules.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A message/code/severity customization was called before any rule.
    #[error("`{method}` on property '{property}' has no preceding rule to customize")]
    DanglingCustomization {
        property: Cow<'static, str>,
        method: &'static str,
    },

    /// A rule chain or link was registered with an empty label.
    #[error("property label must not be empty")]
    EmptyPropertyName,

    /// A regex rule was given a pattern that does not compile.
    #[error("invalid pattern `{pattern}` for property '{property}': {source}")]
    InvalidPattern {
        property: Cow<'static, str>,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A built-in rule was given arguments it cannot work with.
    #[error("invalid arguments to `{rule}` on property '{property}': {reason}")]
    InvalidArgument {
        property: Cow<'static, str>,
        rule: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Property the error was raised for, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::DanglingCustomization { property, .. }
            | Self::InvalidPattern { property, .. }
            | Self::InvalidArgument { property, .. } => Some(property.as_ref()),
            Self::EmptyPropertyName => None,
        }
    }
}
