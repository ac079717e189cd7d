/*!
 * Multicast Delegate Library
 * Typed multicast callback registries ("delegates" / "events")
 *
 * A registry stores free functions and methods bound to shared instances
 * behind one type-erased trampoline and invokes all of them, in registration
 * order, with a single `broadcast`. Listeners take zero to three arguments.
 */

pub mod core;
pub mod delegate;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{DelegateError, DelegateResult};
pub use crate::core::types::{InvokerId, ListenerKind, RegistrationKey, TargetId};
pub use delegate::{
    instance, Args, CallbackRegistry, DelegateConfig, Instance, Listener, MethodListener,
};
pub use monitoring::{init_tracing, DelegateStats};
