//! Typed states and actions.
//!
//! Machines work on integer identifiers internally. Owners usually describe
//! their states and actions as fieldless enums; these traits give every
//! variant one canonical id and one canonical name, so a typed value can be
//! handed to a table or driver without any runtime conversion.

use super::ids::{ActionId, StateId};
use std::fmt::Debug;

/// Trait for typed machine states.
///
/// # Example
///
/// ```rust
/// use statebind::core::{State, StateId};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum CameraState {
///     Follow,
///     Zoom,
/// }
///
/// impl State for CameraState {
///     fn id(&self) -> StateId {
///         StateId(*self as i32)
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Follow => "Follow",
///             Self::Zoom => "Zoom",
///         }
///     }
/// }
///
/// assert_eq!(CameraState::Zoom.id(), StateId(1));
/// ```
pub trait State: Clone + PartialEq + Debug {
    /// Canonical identifier, unique within one machine.
    fn id(&self) -> StateId;

    /// Canonical name for display and logging.
    fn name(&self) -> &str;
}

/// Trait for typed actions that trigger table transitions.
pub trait Action: Clone + PartialEq + Debug {
    /// Canonical identifier, unique within one table.
    fn id(&self) -> ActionId;

    /// Canonical name for display and logging.
    fn name(&self) -> &str;
}
