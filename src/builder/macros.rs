//! Macros that turn fieldless enums into typed states and actions.

/// Generate a [`State`](crate::core::State) implementation for a fieldless enum.
///
/// The id of each variant is its discriminant and its name is the variant
/// identifier. Explicit discriminants are allowed.
///
/// # Example
///
/// ```
/// use statebind::core::{State, StateId};
/// use statebind::state_enum;
///
/// state_enum! {
///     pub enum CameraState {
///         Follow,
///         Zoom,
///         Cutscene = 10,
///     }
/// }
///
/// assert_eq!(CameraState::Zoom.id(), StateId(1));
/// assert_eq!(CameraState::Cutscene.id(), StateId(10));
/// assert_eq!(CameraState::Cutscene.name(), "Cutscene");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),* $(,)?
        }
    ) => {
        $crate::__typed_enum! {
            $(#[$meta])*
            $vis enum $name { $($(#[$variant_meta])* $variant $(= $value)?),* }
            State, StateId
        }
    };
}

/// Generate an [`Action`](crate::core::Action) implementation for a fieldless enum.
///
/// # Example
///
/// ```
/// use statebind::core::{Action, ActionId};
/// use statebind::action_enum;
///
/// action_enum! {
///     enum CameraAction {
///         StartZoom,
///         EndZoom,
///     }
/// }
///
/// assert_eq!(CameraAction::EndZoom.id(), ActionId(1));
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),* $(,)?
        }
    ) => {
        $crate::__typed_enum! {
            $(#[$meta])*
            $vis enum $name { $($(#[$variant_meta])* $variant $(= $value)?),* }
            Action, ActionId
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __typed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident $(= $value:expr)?),*
        }
        $trait:ident, $id:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $value)?
            ),*
        }

        impl $crate::core::$trait for $name {
            fn id(&self) -> $crate::core::$id {
                $crate::core::$id(*self as i32)
            }

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
