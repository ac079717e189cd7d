/*!
 * Monitoring Module
 * Registry statistics and tracing setup
 */

pub mod stats;
pub mod tracer;

pub use stats::{AtomicDelegateStats, DelegateStats};
pub use tracer::init_tracing;
