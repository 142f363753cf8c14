//! Global state management for isoscope.

use std::sync::{OnceLock, RwLock};

use glam::Vec3;

use crate::color_maps::ColorMapRegistry;
use crate::error::{IsoscopeError, Result};
use crate::options::Options;
use crate::registry::Registry;

/// Global context singleton.
static CONTEXT: OnceLock<RwLock<Context>> = OnceLock::new();

/// The global context containing all isoscope state.
pub struct Context {
    /// Whether isoscope has been initialized.
    pub initialized: bool,

    /// The structure registry.
    pub registry: Registry,

    /// Global options.
    pub options: Options,

    /// Available color maps.
    pub color_maps: ColorMapRegistry,

    /// Axis-aligned bounding box of all registered structures.
    pub bounding_box: (Vec3, Vec3),

    /// Representative length scale of all registered structures.
    pub length_scale: f32,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            initialized: false,
            registry: Registry::new(),
            options: Options::default(),
            color_maps: ColorMapRegistry::new(),
            bounding_box: (Vec3::ZERO, Vec3::ONE),
            length_scale: 1.0,
        }
    }
}

impl Context {
    /// Computes the center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.bounding_box.0 + self.bounding_box.1) * 0.5
    }

    /// Recomputes the bounding box and length scale from all structures.
    pub fn update_extents(&mut self) {
        let extent = self
            .registry
            .iter()
            .filter_map(|s| s.bounding_box())
            .reduce(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)));

        match extent {
            Some((min, max)) => {
                self.bounding_box = (min, max);
                self.length_scale = (max - min).length();
            }
            None => {
                self.bounding_box = (Vec3::ZERO, Vec3::ONE);
                self.length_scale = 1.0;
            }
        }
    }
}

/// Initializes the global context.
///
/// The context can be initialized again after [`shutdown_context`].
pub fn init_context() -> Result<()> {
    let lock = CONTEXT.get_or_init(|| RwLock::new(Context::default()));
    let mut ctx = lock.write().map_err(|_| IsoscopeError::NotInitialized)?;
    if ctx.initialized {
        return Err(IsoscopeError::AlreadyInitialized);
    }
    *ctx = Context {
        initialized: true,
        ..Context::default()
    };
    Ok(())
}

/// Returns whether the context has been initialized.
pub fn is_initialized() -> bool {
    CONTEXT
        .get()
        .and_then(|lock| lock.read().ok())
        .is_some_and(|ctx| ctx.initialized)
}

/// Access the global context for reading.
///
/// # Panics
///
/// Panics if isoscope has not been initialized.
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&Context) -> R,
{
    try_with_context(f).expect("isoscope not initialized")
}

/// Access the global context for writing.
///
/// # Panics
///
/// Panics if isoscope has not been initialized.
pub fn with_context_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Context) -> R,
{
    try_with_context_mut(f).expect("isoscope not initialized")
}

/// Try to access the global context for reading.
///
/// Returns `None` if isoscope has not been initialized.
pub fn try_with_context<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Context) -> R,
{
    let guard = CONTEXT.get()?.read().ok()?;
    guard.initialized.then(|| f(&guard))
}

/// Try to access the global context for writing.
///
/// Returns `None` if isoscope has not been initialized.
pub fn try_with_context_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Context) -> R,
{
    let mut guard = CONTEXT.get()?.write().ok()?;
    if !guard.initialized {
        return None;
    }
    Some(f(&mut guard))
}

/// Shuts down the global context, dropping every structure.
pub fn shutdown_context() {
    if let Some(lock) = CONTEXT.get() {
        if let Ok(mut ctx) = lock.write() {
            ctx.initialized = false;
            ctx.registry.clear();
        }
    }
}
