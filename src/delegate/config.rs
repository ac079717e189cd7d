/*!
 * Delegate Configuration
 *
 * Construction-time settings for a registry: tracing label, pre-size hint and
 * per-invocation tracing.
 */

use crate::core::errors::{DelegateError, DelegateResult};
use crate::core::limits::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_LABEL, ENV_INITIAL_CAPACITY, ENV_LABEL,
    ENV_TRACE_INVOCATIONS,
};
use serde::{Deserialize, Serialize};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegateConfig {
    /// Label attached to every tracing event (default: "delegate")
    pub label: String,

    /// Number of registrations to reserve up front (default: 0)
    pub initial_capacity: u16,

    /// Emit a trace event for every listener invocation (default: false)
    pub trace_invocations: bool,
}

impl DelegateConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            trace_invocations: false,
        }
    }

    /// Build configuration from `DELEGATE_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> DelegateResult<Self> {
        let mut config = Self::new();

        if let Ok(label) = std::env::var(ENV_LABEL) {
            config = config.with_label(label);
        }

        if let Ok(raw) = std::env::var(ENV_INITIAL_CAPACITY) {
            let capacity = raw.trim().parse::<u16>().map_err(|e| {
                DelegateError::invalid_config("initial_capacity", format!("{:?}: {}", raw, e))
            })?;
            config.initial_capacity = capacity;
        }

        if let Ok(raw) = std::env::var(ENV_TRACE_INVOCATIONS) {
            config.trace_invocations = parse_flag("trace_invocations", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON document; missing fields use defaults
    pub fn from_json(json: &str) -> DelegateResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: u16) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_trace_invocations(mut self, enabled: bool) -> Self {
        self.trace_invocations = enabled;
        self
    }

    /// Reject configurations that cannot label tracing output
    pub fn validate(&self) -> DelegateResult<()> {
        if self.label.trim().is_empty() {
            return Err(DelegateError::invalid_config("label", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(field: &str, raw: &str) -> DelegateResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DelegateError::invalid_config(
            field,
            format!("expected a boolean, got {:?}", other),
        )),
    }
}
