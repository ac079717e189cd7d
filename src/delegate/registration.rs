/*!
 * Registrations
 * Type-erased binding between a listener and a registry
 */

use super::listener::{Listener, MethodListener};
use crate::core::types::{InvokerId, ListenerKind, RegistrationKey, TargetId};
use parking_lot::Mutex;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

/// Shared handle to an object whose methods can be bound to a registry
pub type Instance<C> = Arc<Mutex<C>>;

/// Wrap `value` in an [`Instance`] so its methods can be registered
pub fn instance<C>(value: C) -> Instance<C> {
    Arc::new(Mutex::new(value))
}

/// Opaque instance handle stored by a registration
pub(crate) enum Target {
    Free,
    Instance(Weak<dyn Any + Send + Sync>),
}

impl Target {
    /// A free target is always live; an instance target is live while the
    /// instance has strong references
    pub(crate) fn is_live(&self) -> bool {
        match self {
            Target::Free => true,
            Target::Instance(handle) => handle.strong_count() > 0,
        }
    }
}

/// Result of a single dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Delivered,
    Stale,
}

/// Trampoline performing the actual call into a function or method
pub(crate) trait Invoke<A>: Send + Sync {
    fn invoke(&self, target: &Target, args: A) -> Delivery;
}

pub(crate) struct FreeInvoker<F> {
    listener: F,
}

impl<F, A> Invoke<A> for FreeInvoker<F>
where
    F: Listener<A>,
{
    #[inline]
    fn invoke(&self, _target: &Target, args: A) -> Delivery {
        self.listener.invoke(args);
        Delivery::Delivered
    }
}

pub(crate) struct MethodInvoker<F, C> {
    method: F,
    _instance: PhantomData<fn(&mut C)>,
}

impl<F, C, A> Invoke<A> for MethodInvoker<F, C>
where
    F: MethodListener<C, A>,
    C: Send + 'static,
{
    fn invoke(&self, target: &Target, args: A) -> Delivery {
        let Target::Instance(handle) = target else {
            return Delivery::Stale;
        };
        let Some(strong) = handle.upgrade() else {
            return Delivery::Stale;
        };
        let Some(cell) = strong.downcast_ref::<Mutex<C>>() else {
            return Delivery::Stale;
        };
        let mut instance = cell.lock();
        self.method.invoke(&mut *instance, args);
        Delivery::Delivered
    }
}

/// A bound listener: identity key, instance handle and trampoline
pub(crate) struct Registration<A> {
    key: RegistrationKey,
    target: Target,
    invoker: Box<dyn Invoke<A>>,
}

impl<A> Registration<A> {
    pub(crate) fn function<F>(listener: F) -> Self
    where
        F: Listener<A>,
    {
        Self {
            key: RegistrationKey::function(InvokerId::of::<F>(ListenerKind::Function)),
            target: Target::Free,
            invoker: Box::new(FreeInvoker { listener }),
        }
    }

    pub(crate) fn method<C, F>(instance: &Instance<C>, method: F) -> Self
    where
        C: Send + 'static,
        F: MethodListener<C, A>,
    {
        let weak: Weak<Mutex<C>> = Arc::downgrade(instance);
        let handle: Weak<dyn Any + Send + Sync> = weak;
        Self {
            key: RegistrationKey::method(
                TargetId::from_ptr(Arc::as_ptr(instance)),
                InvokerId::of::<F>(ListenerKind::Method),
            ),
            target: Target::Instance(handle),
            invoker: Box::new(MethodInvoker {
                method,
                _instance: PhantomData,
            }),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &RegistrationKey {
        &self.key
    }

    /// Identity match. A stale instance registration never matches, so a new
    /// instance allocated at a reused address is not mistaken for the old one.
    #[inline]
    pub(crate) fn matches(&self, key: &RegistrationKey) -> bool {
        self.key == *key && self.target.is_live()
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.target.is_live()
    }

    #[inline]
    pub(crate) fn invoke(&self, args: A) -> Delivery {
        self.invoker.invoke(&self.target, args)
    }
}
