/*!
 * Listener Traits
 * Argument packing for listeners of arity 0 to 3
 *
 * A registry is generic over an argument tuple `A`. The traits below are only
 * implemented for `()`, `(A0,)`, `(A0, A1)` and `(A0, A1, A2)`, which closes the
 * design over three parameters: a callable of any other shape is rejected by
 * the compiler at the registration call site.
 */

use std::marker::PhantomData;
use std::mem::size_of;

/// Argument pack accepted by a registry
pub trait Args {
    /// Number of parameters a listener receives
    const ARITY: usize;
}

/// Free function listener taking the unpacked arguments of `A`
pub trait Listener<A>: Send + Sync + 'static {
    fn invoke(&self, args: A);
}

/// Method listener taking `&mut C` followed by the unpacked arguments of `A`
///
/// Satisfied by `&mut self` method paths such as `Accumulator::add`.
pub trait MethodListener<C, A>: Send + Sync + 'static {
    fn invoke(&self, instance: &mut C, args: A);
}

macro_rules! impl_listener_arity {
    ($arity:expr; $($arg:ident),*) => {
        impl<$($arg,)*> Args for ($($arg,)*) {
            const ARITY: usize = $arity;
        }

        impl<Func, $($arg,)*> Listener<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) + Send + Sync + 'static,
        {
            #[inline]
            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) {
                (self)($($arg),*)
            }
        }

        impl<Func, C, $($arg,)*> MethodListener<C, ($($arg,)*)> for Func
        where
            Func: Fn(&mut C, $($arg),*) + Send + Sync + 'static,
        {
            #[inline]
            #[allow(non_snake_case)]
            fn invoke(&self, instance: &mut C, ($($arg,)*): ($($arg,)*)) {
                (self)(instance, $($arg),*)
            }
        }
    };
}

impl_listener_arity!(0;);
impl_listener_arity!(1; A0);
impl_listener_arity!(2; A0, A1);
impl_listener_arity!(3; A0, A1, A2);

/// Compile-time guard: only zero-sized callables carry their identity in
/// their type. `fn` pointers and capturing closures would make two different
/// targets share one invoker id.
pub(crate) struct StaticCallable<F>(PhantomData<F>);

impl<F> StaticCallable<F> {
    pub(crate) const CHECK: () = assert!(
        size_of::<F>() == 0,
        "listeners must be fn items, method paths or non-capturing closures"
    );
}
