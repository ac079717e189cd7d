/*!
 * Tracing Setup
 * Structured tracing for registry operations using the tracing crate
 *
 * The library only emits events; applications (and tests) that want to see
 * them install a subscriber through [`init_tracing`].
 */

use crate::core::errors::{DelegateError, DelegateResult};
use crate::core::limits::ENV_TRACE_JSON;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - DELEGATE_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() -> DelegateResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .with_current_span(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| DelegateError::TracingInit(e.to_string()))?;
    info!(json = use_json, "Structured tracing initialized");
    Ok(())
}
