//! Macros for ergonomic state declaration.

/// Declare a fieldless state enum usable by the engine.
///
/// Derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` and `Debug`, and adds
/// an `ALL` constant listing the variants in declaration order plus a
/// `name()` method.
///
/// # Example
///
/// ```
/// use reactive_fsm::state_enum;
///
/// state_enum! {
///     pub enum Visibility {
///         Collapsed,
///         FadingIn,
///         Visible,
///     }
/// }
///
/// assert_eq!(Visibility::ALL.len(), 3);
/// assert_eq!(Visibility::FadingIn.name(), "FadingIn");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
