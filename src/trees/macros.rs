/// Derives [`SomeWalker`](crate::trees::SomeWalker) for a walker that wraps an inner walker,
/// forwarding everything except `go_up`.
/// Format is:
///```ignore
/// derive_SomeWalker!{walker,
///     impl<'a, T> SomeWalker<T> for AVLWalker<'a, T> {
///         fn go_up(&mut self) -> Result<Side, ()> {
///             ...
///         }
///     }
/// }
///```
/// Expects the `go_up` method to be implemented.
macro_rules! derive_SomeWalker {
    ($accessor:ident, impl<$lifetime:lifetime, $elem:ident> SomeWalker<$_elem:ident> for $self:ty
        { $($token:tt)* }
    ) => {
        impl<$lifetime, $elem> $crate::trees::SomeWalker<$elem> for $self {
            fn go_left(&mut self) -> Result<(), ()> {
                $crate::trees::SomeWalker::go_left(&mut self.$accessor)
            }

            fn go_right(&mut self) -> Result<(), ()> {
                $crate::trees::SomeWalker::go_right(&mut self.$accessor)
            }

            fn depth(&self) -> usize {
                $crate::trees::SomeWalker::depth(&self.$accessor)
            }

            fn value(&self) -> Option<&$elem> {
                $crate::trees::SomeWalker::value(&self.$accessor)
            }

            $($token)*
        }
    };
}
