//! Per-state enter/update/exit callbacks.

use std::fmt;

/// Boxed callback invoked with the owner's context.
pub type Callback<Ctx> = Box<dyn FnMut(&mut Ctx)>;

/// Callbacks attached to one state.
///
/// `Ctx` is whatever the owner passes into the driving calls (`start`,
/// `execute_action`, `update`, notifications). Enter and exit are always
/// present; update is optional and its absence is explicit.
///
/// # Example
///
/// ```rust
/// use statebind::core::Binding;
///
/// struct Camera {
///     zoom: f32,
/// }
///
/// let binding = Binding::new(
///     |cam: &mut Camera| cam.zoom = 2.0,
///     |cam: &mut Camera| cam.zoom = 1.0,
/// )
/// .with_update(|cam: &mut Camera| cam.zoom += 0.01);
///
/// assert!(binding.has_update());
/// ```
pub struct Binding<Ctx> {
    on_enter: Callback<Ctx>,
    on_update: Option<Callback<Ctx>>,
    on_exit: Callback<Ctx>,
}

impl<Ctx> Binding<Ctx> {
    pub fn new<E, X>(on_enter: E, on_exit: X) -> Self
    where
        E: FnMut(&mut Ctx) + 'static,
        X: FnMut(&mut Ctx) + 'static,
    {
        Self {
            on_enter: Box::new(on_enter),
            on_update: None,
            on_exit: Box::new(on_exit),
        }
    }

    /// Binding whose enter and exit do nothing.
    pub fn empty() -> Self {
        Self::new(|_: &mut Ctx| {}, |_: &mut Ctx| {})
    }

    /// Attach an update callback, replacing any previous one.
    pub fn with_update<U>(mut self, on_update: U) -> Self
    where
        U: FnMut(&mut Ctx) + 'static,
    {
        self.on_update = Some(Box::new(on_update));
        self
    }

    pub fn has_update(&self) -> bool {
        self.on_update.is_some()
    }

    pub(crate) fn enter(&mut self, ctx: &mut Ctx) {
        (self.on_enter)(ctx);
    }

    /// Returns whether an update callback ran.
    pub(crate) fn update(&mut self, ctx: &mut Ctx) -> bool {
        match self.on_update.as_mut() {
            Some(on_update) => {
                on_update(ctx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn exit(&mut self, ctx: &mut Ctx) {
        (self.on_exit)(ctx);
    }
}

impl<Ctx> Default for Binding<Ctx> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Ctx> fmt::Debug for Binding<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("has_update", &self.has_update())
            .finish_non_exhaustive()
    }
}
