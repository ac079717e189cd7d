/*!
 * Callback Registry
 * Ordered multicast registry of free functions and bound methods
 *
 * # Identity
 * Each registration is keyed by `(instance address, invoker)`. The invoker id
 * comes from the callable's own type, fixed at the registration call site, so
 * registering the same function twice (or the same method on the same
 * instance) is a silent no-op and removal finds the entry without comparing
 * closures.
 *
 * # Ownership
 * Bound instances are held through `Weak` handles. The registry never keeps an
 * instance alive; once the last `Instance` clone is dropped its registrations
 * become stale. Stale registrations are skipped by `broadcast`, never match an
 * identity check and can be purged with [`CallbackRegistry::remove_stale`].
 *
 * # Re-entrancy
 * Mutation takes `&mut self` while `broadcast` borrows the registry for its
 * whole run, so a listener cannot add or remove registrations mid-broadcast.
 * A method listener that broadcasts into a registry bound to its own instance
 * deadlocks on the instance mutex.
 *
 * # Borrowed arguments
 * The argument tuple is part of the registry type, lifetimes included. A
 * `CallbackRegistry<(&'a str,)>` can only broadcast borrows that live at least
 * as long as the registry itself, so declare the borrowed data before the
 * registry. Named delegates need an explicit lifetime:
 * `declare_delegate!(OnName, &'static str)`.
 */

use super::config::DelegateConfig;
use super::listener::{Args, Listener, MethodListener, StaticCallable};
use super::registration::{Delivery, Instance, Registration};
use crate::core::types::{InvokerId, ListenerKind, RegistrationKey, TargetId};
use crate::monitoring::stats::{AtomicDelegateStats, DelegateStats};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Multicast callback registry for listeners taking the arguments `A`
///
/// `A` is a tuple of zero to three argument types. Declare concrete registry
/// types with [`declare_delegate!`](crate::declare_delegate).
///
/// ```
/// use multicast_delegate::{declare_delegate, instance};
///
/// declare_delegate!(OnScore, u32, u32);
///
/// struct Board {
///     total: u32,
/// }
///
/// impl Board {
///     fn add(&mut self, a: u32, b: u32) {
///         self.total += a + b;
///     }
/// }
///
/// fn log_score(a: u32, b: u32) {
///     println!("score {}", a + b);
/// }
///
/// let board = instance(Board { total: 0 });
/// let mut on_score = OnScore::new();
/// on_score.add_listener(log_score);
/// on_score.add_method_listener(&board, Board::add);
///
/// on_score.broadcast((2, 3));
/// assert_eq!(board.lock().total, 5);
/// ```
///
/// Runtime-valued callables carry no identity in their type and are rejected
/// at compile time:
///
/// ```compile_fail
/// use multicast_delegate::CallbackRegistry;
///
/// fn tick() {}
/// let pointer: fn() = tick;
/// let mut registry = CallbackRegistry::<()>::new();
/// registry.add_listener(pointer);
/// ```
///
/// Capturing closures are rejected for the same reason:
///
/// ```compile_fail
/// use multicast_delegate::CallbackRegistry;
///
/// let offset = 3u32;
/// let mut registry = CallbackRegistry::<(u32,)>::new();
/// registry.add_listener(move |value: u32| println!("{}", value + offset));
/// ```
pub struct CallbackRegistry<A> {
    registrations: Vec<Registration<A>>,
    config: DelegateConfig,
    stats: AtomicDelegateStats,
}

impl<A> CallbackRegistry<A> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_config(DelegateConfig::default())
    }

    /// Create an empty registry with room for `reserve` registrations
    pub fn with_capacity(reserve: u16) -> Self {
        Self::with_config(DelegateConfig::new().with_initial_capacity(reserve))
    }

    pub fn with_config(config: DelegateConfig) -> Self {
        Self {
            registrations: Vec::with_capacity(usize::from(config.initial_capacity)),
            config,
            stats: AtomicDelegateStats::new(),
        }
    }

    /// Register a free function
    ///
    /// Returns `false` if the function is already registered, in which case
    /// nothing changes.
    pub fn add_listener<F>(&mut self, function: F) -> bool
    where
        F: Listener<A>,
    {
        let () = StaticCallable::<F>::CHECK;
        let key = RegistrationKey::function(InvokerId::of::<F>(ListenerKind::Function));
        if self.position(&key).is_some() {
            self.note_duplicate(&key);
            return false;
        }

        self.push(Registration::function(function));
        true
    }

    /// Register `method` bound to `instance`
    ///
    /// The registry keeps a weak handle only: the caller owns `instance`.
    /// Returns `false` if this method is already registered for this instance.
    pub fn add_method_listener<C, F>(&mut self, instance: &Instance<C>, method: F) -> bool
    where
        C: Send + 'static,
        F: MethodListener<C, A>,
    {
        let () = StaticCallable::<F>::CHECK;
        let key = method_key::<C, F>(instance);
        if self.position(&key).is_some() {
            self.note_duplicate(&key);
            return false;
        }

        self.push(Registration::method(instance, method));
        true
    }

    /// Remove a free function registration
    ///
    /// Returns `false` (and does nothing) if it was not registered.
    pub fn remove_listener<F>(&mut self, function: F) -> bool
    where
        F: Listener<A>,
    {
        let _ = function;
        let () = StaticCallable::<F>::CHECK;
        let key = RegistrationKey::function(InvokerId::of::<F>(ListenerKind::Function));
        self.remove_key(&key)
    }

    /// Remove the registration of `method` bound to `instance`
    ///
    /// Returns `false` (and does nothing) if it was not registered.
    pub fn remove_method_listener<C, F>(&mut self, instance: &Instance<C>, method: F) -> bool
    where
        C: Send + 'static,
        F: MethodListener<C, A>,
    {
        let _ = method;
        let () = StaticCallable::<F>::CHECK;
        let key = method_key::<C, F>(instance);
        self.remove_key(&key)
    }

    /// Remove every registration
    pub fn remove_all(&mut self) {
        let removed = self.registrations.len();
        self.registrations.clear();
        self.stats.add_listeners_removed(removed as u64);
        debug!(label = %self.config.label, removed, "Removed all listeners");
    }

    /// Drop registrations whose bound instance no longer exists
    ///
    /// Returns the number of registrations removed.
    pub fn remove_stale(&mut self) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(Registration::is_live);
        let removed = before - self.registrations.len();
        if removed > 0 {
            self.stats.add_listeners_removed(removed as u64);
            debug!(label = %self.config.label, removed, "Removed stale listeners");
        }
        removed
    }

    pub fn contains_listener<F>(&self, function: F) -> bool
    where
        F: Listener<A>,
    {
        let _ = function;
        let () = StaticCallable::<F>::CHECK;
        let key = RegistrationKey::function(InvokerId::of::<F>(ListenerKind::Function));
        self.position(&key).is_some()
    }

    pub fn contains_method_listener<C, F>(&self, instance: &Instance<C>, method: F) -> bool
    where
        C: Send + 'static,
        F: MethodListener<C, A>,
    {
        let _ = method;
        let () = StaticCallable::<F>::CHECK;
        self.position(&method_key::<C, F>(instance)).is_some()
    }

    /// Number of registrations, stale ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.registrations.capacity()
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.config.label
    }

    #[inline]
    pub fn config(&self) -> &DelegateConfig {
        &self.config
    }

    /// Registration keys in broadcast order
    pub fn keys(&self) -> impl Iterator<Item = &RegistrationKey> + '_ {
        self.registrations.iter().map(Registration::key)
    }

    pub fn stats(&self) -> DelegateStats {
        self.stats.snapshot()
    }

    fn position(&self, key: &RegistrationKey) -> Option<usize> {
        self.registrations.iter().position(|reg| reg.matches(key))
    }

    fn push(&mut self, registration: Registration<A>) {
        debug!(
            label = %self.config.label,
            invoker = registration.key().invoker.name(),
            target = ?registration.key().target,
            "Registered listener"
        );
        self.registrations.push(registration);
        self.stats.inc_listeners_added();
    }

    fn note_duplicate(&self, key: &RegistrationKey) {
        self.stats.inc_duplicates_ignored();
        debug!(
            label = %self.config.label,
            invoker = key.invoker.name(),
            target = ?key.target,
            "Listener already registered, ignoring"
        );
    }

    fn remove_key(&mut self, key: &RegistrationKey) -> bool {
        match self.position(key) {
            Some(index) => {
                self.registrations.remove(index);
                self.stats.add_listeners_removed(1);
                debug!(
                    label = %self.config.label,
                    invoker = key.invoker.name(),
                    target = ?key.target,
                    "Unregistered listener"
                );
                true
            }
            None => {
                trace!(
                    label = %self.config.label,
                    invoker = key.invoker.name(),
                    "Listener not registered, nothing to remove"
                );
                false
            }
        }
    }
}

impl<A: Clone> CallbackRegistry<A> {
    /// Invoke every registration in registration order with a copy of `args`
    ///
    /// A panicking listener unwinds through `broadcast`; later listeners are
    /// not called for this broadcast.
    pub fn broadcast(&self, args: A) {
        self.stats.inc_broadcasts();
        trace!(
            label = %self.config.label,
            listeners = self.registrations.len(),
            "Broadcasting"
        );

        let mut delivered = 0u64;
        let mut stale = 0u64;
        for registration in &self.registrations {
            match registration.invoke(args.clone()) {
                Delivery::Delivered => {
                    delivered += 1;
                    if self.config.trace_invocations {
                        trace!(
                            label = %self.config.label,
                            invoker = registration.key().invoker.name(),
                            "Invoked listener"
                        );
                    }
                }
                Delivery::Stale => {
                    stale += 1;
                    trace!(
                        label = %self.config.label,
                        invoker = registration.key().invoker.name(),
                        target = ?registration.key().target,
                        "Skipped listener with dropped instance"
                    );
                }
            }
        }

        self.stats.add_invocations(delivered);
        self.stats.add_stale_skips(stale);
    }
}

impl<A: Args> CallbackRegistry<A> {
    /// Number of arguments each listener receives
    pub const fn arity() -> usize {
        A::ARITY
    }
}

impl<A> Default for CallbackRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for CallbackRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("label", &self.config.label)
            .field("listeners", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn method_key<C, F: 'static>(instance: &Instance<C>) -> RegistrationKey {
    RegistrationKey::method(
        TargetId::from_ptr(Arc::as_ptr(instance)),
        InvokerId::of::<F>(ListenerKind::Method),
    )
}
