//! Failure records
//!
//! A [`Failure`] describes one violated rule. It is immutable once built:
//! the builder methods consume the value and return a new one, and the
//! collection combinator relabels by constructing a fresh record.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity level of a failure.
///
/// Ordered from least to most severe, so `severity >= Severity::Warning`
/// selects warnings and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Should be addressed but callers may choose not to block on it.
    Warning,
    /// Must be fixed (default).
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

// ============================================================================
// FAILURE
// ============================================================================

/// One recorded rule violation.
///
/// `property` is `None` when the failure applies to the whole instance.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::foundation::{Failure, Severity};
///
/// let failure = Failure::new("Name is empty")
///     .with_property("name")
///     .with_code("NotEmpty")
///     .with_attempted_value("\"\"");
///
/// assert_eq!(failure.property(), Some("name"));
/// assert_eq!(failure.severity(), Severity::Error);
/// assert_eq!(failure.to_string(), "name - [NotEmpty]: Name is empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    property_name: Option<Cow<'static, str>>,
    message: Cow<'static, str>,
    attempted_value: Option<String>,
    error_code: Option<Cow<'static, str>>,
    severity: Severity,
}

impl Failure {
    /// Creates a failure with a message and no property, code or value.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            property_name: None,
            message: message.into(),
            attempted_value: None,
            error_code: None,
            severity: Severity::Error,
        }
    }

    /// Creates a failure bound to a property.
    pub fn for_property(
        property: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(message).with_property(property)
    }

    /// Sets the property name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property(mut self, property: impl Into<Cow<'static, str>>) -> Self {
        self.property_name = Some(property.into());
        self
    }

    /// Sets the rendered value that failed.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_attempted_value(mut self, value: impl Into<String>) -> Self {
        self.attempted_value = Some(value.into());
        self
    }

    /// Sets the error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Sets the severity.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns a copy of this failure carrying a different message.
    ///
    /// Property, attempted value, code and severity are preserved.
    #[must_use]
    pub fn relabeled(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            ..self.clone()
        }
    }

    /// Property the failure belongs to, `None` for the whole instance.
    pub fn property(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Debug rendering of the value that failed, if captured.
    pub fn attempted_value(&self) -> Option<&str> {
        self.attempted_value.as_deref()
    }

    /// Error code for programmatic handling.
    pub fn code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Severity level.
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property().unwrap_or("<root>"))?;
        match self.code() {
            Some(code) if !code.is_empty() => write!(f, " - [{code}]: {}", self.message),
            _ => write!(f, ": {}", self.message),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
