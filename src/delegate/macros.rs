/*!
 * Declaration Macros
 */

/// Declare a named registry type for zero to three argument types
///
/// ```
/// use multicast_delegate::declare_delegate;
///
/// declare_delegate!(pub OnTick);
/// declare_delegate!(pub OnResize, u32, u32);
/// declare_delegate!(OnMove, f32, f32, f32);
///
/// assert_eq!(OnTick::arity(), 0);
/// assert_eq!(OnResize::arity(), 2);
/// assert_eq!(OnMove::arity(), 3);
/// ```
#[macro_export]
macro_rules! declare_delegate {
    ($vis:vis $name:ident) => {
        $vis type $name = $crate::CallbackRegistry<()>;
    };
    ($vis:vis $name:ident, $a0:ty) => {
        $vis type $name = $crate::CallbackRegistry<($a0,)>;
    };
    ($vis:vis $name:ident, $a0:ty, $a1:ty) => {
        $vis type $name = $crate::CallbackRegistry<($a0, $a1)>;
    };
    ($vis:vis $name:ident, $a0:ty, $a1:ty, $a2:ty) => {
        $vis type $name = $crate::CallbackRegistry<($a0, $a1, $a2)>;
    };
}
