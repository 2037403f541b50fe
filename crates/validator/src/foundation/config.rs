//! Validator execution settings

use serde::{Deserialize, Serialize};

/// How a validator runs its producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One producer after another on the calling thread.
    #[default]
    Sequential,
    /// Producers fan out on the rayon pool; failures are still merged in
    /// registration order.
    Parallel,
}

/// Execution settings for one validator.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::foundation::{ExecutionMode, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{ "execution": "parallel" }"#).unwrap();
/// assert_eq!(config.execution, ExecutionMode::Parallel);
/// assert_eq!(config.parallel_threshold, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Sequential or parallel producer evaluation.
    pub execution: ExecutionMode,
    /// Minimum number of producers before parallel mode fans out.
    pub parallel_threshold: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::Sequential,
            parallel_threshold: 4,
        }
    }
}

impl ValidatorConfig {
    /// Sequential evaluation (the default).
    #[must_use]
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parallel evaluation with the default threshold.
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            execution: ExecutionMode::Parallel,
            ..Self::default()
        }
    }

    /// Sets the parallel threshold.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Reads `FLOWCHECK_EXECUTION` and `FLOWCHECK_PARALLEL_THRESHOLD`.
    ///
    /// Missing or unparsable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(mode) = lookup("FLOWCHECK_EXECUTION") {
            match mode.trim().to_lowercase().as_str() {
                "parallel" => config.execution = ExecutionMode::Parallel,
                "sequential" => config.execution = ExecutionMode::Sequential,
                other => tracing::warn!(value = other, "ignoring unknown FLOWCHECK_EXECUTION"),
            }
        }

        if let Some(threshold) = lookup("FLOWCHECK_PARALLEL_THRESHOLD") {
            match threshold.trim().parse() {
                Ok(value) => config.parallel_threshold = value,
                Err(_) => tracing::warn!(
                    value = %threshold,
                    "ignoring unparsable FLOWCHECK_PARALLEL_THRESHOLD"
                ),
            }
        }

        config
    }

    /// Whether a validator with `producers` producers should fan out.
    pub(crate) fn fans_out(&self, producers: usize) -> bool {
        self.execution == ExecutionMode::Parallel && producers >= self.parallel_threshold.max(2)
    }
}
