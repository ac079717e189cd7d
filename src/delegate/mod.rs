/*!
 * Delegate Module
 * Multicast callback registries for free functions and bound methods
 */

pub mod config;
mod listener;
mod macros;
mod registration;
mod registry;

// Re-export public API
pub use config::DelegateConfig;
pub use listener::{Args, Listener, MethodListener};
pub use registration::{instance, Instance};
pub use registry::CallbackRegistry;
