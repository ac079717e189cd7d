/*!
 * Limits and Constants
 *
 * Defaults shared by the registry and its configuration layer.
 */

// =============================================================================
// REGISTRY
// =============================================================================

/// Default pre-sized capacity of a new registry
/// Empty registries never allocate
pub const DEFAULT_INITIAL_CAPACITY: u16 = 0;

/// Default label attached to every tracing event of a registry
pub const DEFAULT_LABEL: &str = "delegate";

/// Largest arity a listener may declare
pub const MAX_ARITY: usize = 3;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides [`DEFAULT_LABEL`]
pub const ENV_LABEL: &str = "DELEGATE_LABEL";

/// Overrides [`DEFAULT_INITIAL_CAPACITY`]
pub const ENV_INITIAL_CAPACITY: &str = "DELEGATE_INITIAL_CAPACITY";

/// Enables per-invocation trace events
pub const ENV_TRACE_INVOCATIONS: &str = "DELEGATE_TRACE_INVOCATIONS";

/// Switches `init_tracing` to JSON output
pub const ENV_TRACE_JSON: &str = "DELEGATE_TRACE_JSON";
