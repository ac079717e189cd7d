/*!
 * Error Types
 * Errors for the ambient layers (configuration, tracing setup).
 *
 * The registry operations themselves never fail at runtime: mismatched
 * signatures are rejected by the compiler and duplicates/absent removals are
 * silent no-ops.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for fallible delegate-adjacent operations
pub type DelegateResult<T> = Result<T, DelegateError>;

/// Delegate errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DelegateError {
    #[error("Invalid configuration value for {field}: {reason}")]
    #[diagnostic(
        code(delegate::invalid_config),
        help("Check the DELEGATE_* environment variables or the JSON config document.")
    )]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(
        code(delegate::config_parse),
        help("The configuration must be a JSON object with label, initial_capacity and trace_invocations.")
    )]
    ConfigParse(String),

    #[error("Failed to initialize tracing: {0}")]
    #[diagnostic(
        code(delegate::tracing_init),
        help("A global tracing subscriber can only be installed once per process.")
    )]
    TracingInit(String),
}

impl DelegateError {
    pub(crate) fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DelegateError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
