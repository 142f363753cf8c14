//! Structure trait shared by every extracted level set.
//!
//! A [`Structure`] owns a scalar field, the threshold it is extracted at,
//! and the cached vertex buffer the renderer uploads.

use std::any::Any;

use glam::Vec3;

/// A named, threshold-driven object managed by isoscope.
///
/// Each structure has:
/// - A unique name within its type
/// - A visibility flag
/// - A threshold and a lazily regenerated vertex buffer
pub trait Structure: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the unique name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g., "`Contour`").
    fn type_name(&self) -> &'static str;

    /// Returns the axis-aligned bounding box of the underlying grid.
    fn bounding_box(&self) -> Option<(Vec3, Vec3)>;

    /// Returns whether this structure is currently visible.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);

    /// Returns the current threshold.
    fn threshold(&self) -> f32;

    /// Sets the threshold. The vertex buffer is regenerated on the next
    /// [`update`](Structure::update) if the value changed.
    fn set_threshold(&mut self, threshold: f32);

    /// Regenerates the vertex buffer if it is stale.
    ///
    /// Returns true if an extraction ran.
    fn update(&mut self) -> bool;

    /// Returns the cached vertex buffer as raw bytes.
    fn vertex_bytes(&self) -> &[u8];

    /// Returns the number of vertices in the cached buffer.
    fn vertex_count(&self) -> usize;
}
