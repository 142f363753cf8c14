//! Isosurfaces of a 3D scalar field.

mod extract;

pub use extract::marching_cubes;

use std::sync::Arc;

use glam::{Vec3, Vec4};
use isoscope_core::{Grid3, ScalarField, Structure};

use crate::cache::{ExtractionCache, ExtractionStats};
use crate::color::ValueColor;
use crate::vertex::MeshVertex;

/// Default number of entries in [`Isosurface::color_lookup`].
pub const DEFAULT_LOOKUP_RESOLUTION: usize = 32;

/// A threshold-driven triangle mesh over a 3D grid.
///
/// The field is shared so that 2D slices of the same volume can sample it
/// without copying. Like [`Contour`](crate::Contour), the buffer is
/// regenerated at most once per change of threshold, color, or field.
pub struct Isosurface {
    name: String,
    field: Arc<Grid3>,
    threshold: f32,
    color: ValueColor,
    lookup_resolution: usize,
    enabled: bool,
    cache: ExtractionCache<MeshVertex>,
}

impl Isosurface {
    /// Creates an isosurface at the midpoint of the field's value range.
    pub fn new(name: impl Into<String>, field: Arc<Grid3>) -> Self {
        let (min, max) = field.scalars().range();
        Self {
            name: name.into(),
            field,
            threshold: (min + max) * 0.5,
            color: ValueColor::default(),
            lookup_resolution: DEFAULT_LOOKUP_RESOLUTION,
            enabled: true,
            cache: ExtractionCache::new(),
        }
    }

    /// Returns the underlying field.
    #[must_use]
    pub fn field(&self) -> &Grid3 {
        &self.field
    }

    /// Returns a shared handle to the field.
    #[must_use]
    pub fn shared_field(&self) -> Arc<Grid3> {
        Arc::clone(&self.field)
    }

    /// Returns the field for modification.
    ///
    /// Returns `None` while the field is shared with another owner.
    pub fn field_mut(&mut self) -> Option<&mut Grid3> {
        let field = Arc::get_mut(&mut self.field)?;
        self.cache.invalidate();
        Some(field)
    }

    /// Replaces the field, keeping the threshold.
    pub fn set_field(&mut self, field: Arc<Grid3>) -> &mut Self {
        self.field = field;
        self.cache.invalidate();
        self
    }

    /// Gets the threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Sets the threshold. Non-finite values are ignored.
    pub fn set_threshold(&mut self, threshold: f32) -> &mut Self {
        if threshold.is_finite() {
            self.threshold = threshold;
        } else {
            log::warn!(
                "isosurface '{}': ignoring non-finite threshold {threshold}",
                self.name
            );
        }
        self
    }

    /// Moves the threshold by `delta`.
    pub fn step_threshold(&mut self, delta: f32) -> &mut Self {
        self.set_threshold(self.threshold + delta)
    }

    /// The threshold mapped into `[0, 1]` over the field's value range.
    #[must_use]
    pub fn normalized_threshold(&self) -> f32 {
        self.field.scalars().normalize(self.threshold)
    }

    /// Gets the color function.
    #[must_use]
    pub fn color(&self) -> &ValueColor {
        &self.color
    }

    /// Sets the color function.
    pub fn set_color(&mut self, color: ValueColor) -> &mut Self {
        self.color = color;
        self.cache.invalidate();
        self
    }

    /// Gets the color lookup resolution.
    #[must_use]
    pub fn lookup_resolution(&self) -> usize {
        self.lookup_resolution
    }

    /// Sets the color lookup resolution.
    pub fn set_lookup_resolution(&mut self, resolution: usize) -> &mut Self {
        self.lookup_resolution = resolution;
        self
    }

    /// Colors sampled evenly over the normalized value range, for renderers
    /// that color in-shader from [`MeshVertex::color_norm`].
    #[must_use]
    pub fn color_lookup(&self) -> Vec<Vec4> {
        self.color.lookup_table(self.lookup_resolution)
    }

    /// Re-extracts the buffer if the threshold, color or field changed.
    ///
    /// Returns true if an extraction ran.
    pub fn update(&mut self) -> bool {
        let Self {
            field,
            threshold,
            color,
            cache,
            ..
        } = self;
        cache.refresh(*threshold, field.generation(), |out| {
            marching_cubes(&**field, *threshold, &*color, out)
        })
    }

    /// Returns the up-to-date vertex buffer, re-extracting if needed.
    pub fn vertices(&mut self) -> &[MeshVertex] {
        self.update();
        self.cache.vertices()
    }

    /// Returns the buffer as of the last extraction without refreshing it.
    #[must_use]
    pub fn cached_vertices(&self) -> &[MeshVertex] {
        self.cache.vertices()
    }

    /// Number of triangles in the cached buffer.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.cache.vertices().len() / 3
    }

    /// Number of extractions run so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.cache.recomputes()
    }

    /// Statistics of the last extraction.
    #[must_use]
    pub fn last_stats(&self) -> ExtractionStats {
        self.cache.stats()
    }
}

impl Structure for Isosurface {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "Isosurface"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        Some(self.field.bounds())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: f32) {
        Isosurface::set_threshold(self, threshold);
    }

    fn update(&mut self) -> bool {
        Isosurface::update(self)
    }

    fn vertex_bytes(&self) -> &[u8] {
        self.cache.bytes()
    }

    fn vertex_count(&self) -> usize {
        self.cache.vertices().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec3;

    fn sphere() -> Arc<Grid3> {
        Arc::new(
            Grid3::uniform(
                |x, y, z| (x * x + y * y + z * z).sqrt(),
                UVec3::splat(12),
                Vec3::splat(-1.0),
                Vec3::splat(1.0),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_default_threshold_is_midpoint() {
        let field = sphere();
        let (min, max) = field.scalars().range();
        let surface = Isosurface::new("s", field);
        assert!((surface.threshold() - (min + max) * 0.5).abs() < 1e-6);
        assert!((surface.normalized_threshold() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cache_counts_recomputes() {
        let mut surface = Isosurface::new("s", sphere());
        surface.set_threshold(0.5);
        let first = surface.vertices().len();
        assert!(first > 0);
        surface.set_threshold(0.5);
        let _ = surface.vertices();
        assert_eq!(surface.recompute_count(), 1);

        surface.set_threshold(0.7);
        let _ = surface.vertices();
        let _ = surface.vertices();
        assert_eq!(surface.recompute_count(), 2);
        assert_eq!(surface.num_triangles(), surface.last_stats().primitives);
    }

    #[test]
    fn test_color_change_invalidates() {
        let mut surface = Isosurface::new("s", sphere());
        surface.update();
        surface.set_color(ValueColor::rainbow_translucent());
        assert!(surface.update());
        assert!(surface.cached_vertices().iter().all(|v| (v.color[3] - 0.1).abs() < 1e-6));
    }

    #[test]
    fn test_shared_field_is_read_only() {
        let field = sphere();
        let mut surface = Isosurface::new("s", Arc::clone(&field));
        assert!(surface.field_mut().is_none());
        drop(field);
        surface.update();
        surface.field_mut().unwrap().translate(Vec3::X);
        assert!(surface.update());
        let (min, _) = surface.bounding_box().unwrap();
        assert!((min.x - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_lookup_resolution() {
        let mut surface = Isosurface::new("s", sphere());
        assert_eq!(surface.color_lookup().len(), DEFAULT_LOOKUP_RESOLUTION);
        surface.set_lookup_resolution(4);
        assert_eq!(surface.color_lookup().len(), 4);
    }
}
