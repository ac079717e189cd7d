/*!
 * Core Types
 * Identity types shared by registrations and the registry
 */

use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::fmt;

/// How a listener is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// Free function or non-capturing closure, no instance
    Function,
    /// Method called on a bound instance
    Method,
}

/// Identity of a trampoline
///
/// Derived from the callable's own type. Fn items, method paths and
/// non-capturing closures each have a distinct zero-sized type, so two
/// registrations of the same callable always produce equal ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvokerId {
    type_id: TypeId,
    kind: ListenerKind,
    name: &'static str,
}

impl InvokerId {
    /// Invoker id for the callable type `F`
    #[inline]
    pub fn of<F: 'static>(kind: ListenerKind) -> Self {
        Self {
            type_id: TypeId::of::<F>(),
            kind,
            name: type_name::<F>(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Type name of the callable, for diagnostics only
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for InvokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.name)
    }
}

/// Address identity of a bound instance
///
/// Identity only. Holding a `TargetId` never keeps the instance alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(usize);

impl TargetId {
    #[inline]
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr as *const () as usize)
    }

    #[inline]
    pub fn addr(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// De-duplication key of a registration
///
/// `target` is `None` for free functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    pub target: Option<TargetId>,
    pub invoker: InvokerId,
}

impl RegistrationKey {
    #[inline]
    pub fn function(invoker: InvokerId) -> Self {
        Self {
            target: None,
            invoker,
        }
    }

    #[inline]
    pub fn method(target: TargetId, invoker: InvokerId) -> Self {
        Self {
            target: Some(target),
            invoker,
        }
    }

    #[inline]
    pub fn kind(&self) -> ListenerKind {
        self.invoker.kind
    }
}
