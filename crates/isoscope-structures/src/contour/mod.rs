//! Contour lines of a 2D scalar field.

mod extract;

pub use extract::marching_squares;
pub(crate) use extract::case_code;

use glam::Vec3;
use isoscope_core::{Grid2, ScalarField, Structure};

use crate::cache::{ExtractionCache, ExtractionStats};
use crate::color::CellColor;
use crate::vertex::ContourVertex;

/// Default height multiplier for [`ContourPlacement::Surface`].
pub const DEFAULT_DEPTH_SCALE: f32 = 1.005;

/// Primitives emitted per crossing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourStyle {
    /// Line segments along the level set.
    #[default]
    Lines,
    /// Triangles covering the region above the threshold.
    Filled,
}

/// How contour vertices get their z coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContourPlacement {
    /// On the height surface `z = value * depth_scale`, lifted slightly above
    /// it by a scale just over 1.
    Surface { depth_scale: f32 },
    /// Flat at a constant height.
    Plane(f32),
}

impl Default for ContourPlacement {
    fn default() -> Self {
        Self::Surface {
            depth_scale: DEFAULT_DEPTH_SCALE,
        }
    }
}

/// Everything besides the field and threshold that shapes a contour.
#[derive(Debug, Clone, Default)]
pub struct ContourSettings {
    pub style: ContourStyle,
    pub placement: ContourPlacement,
    pub color: CellColor,
}

/// A threshold-driven contour over a 2D grid.
///
/// The vertex buffer is regenerated lazily: changing the threshold, the
/// settings, or the field marks it stale, and the next [`Contour::update`]
/// or [`Contour::vertices`] call re-extracts it once.
pub struct Contour {
    name: String,
    field: Grid2,
    threshold: f32,
    settings: ContourSettings,
    enabled: bool,
    cache: ExtractionCache<ContourVertex>,
}

impl Contour {
    /// Creates a contour at the midpoint of the field's value range.
    pub fn new(name: impl Into<String>, field: Grid2) -> Self {
        let (min, max) = field.scalars().range();
        Self {
            name: name.into(),
            field,
            threshold: (min + max) * 0.5,
            settings: ContourSettings::default(),
            enabled: true,
            cache: ExtractionCache::new(),
        }
    }

    /// Returns the underlying field.
    #[must_use]
    pub fn field(&self) -> &Grid2 {
        &self.field
    }

    /// Returns the field for modification. The cached buffer is discarded.
    pub fn field_mut(&mut self) -> &mut Grid2 {
        self.cache.invalidate();
        &mut self.field
    }

    /// Replaces the field, keeping the threshold.
    pub fn set_field(&mut self, field: Grid2) -> &mut Self {
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
            log::warn!("contour '{}': ignoring non-finite threshold {threshold}", self.name);
        }
        self
    }

    /// Moves the threshold by `delta`.
    pub fn step_threshold(&mut self, delta: f32) -> &mut Self {
        self.set_threshold(self.threshold + delta)
    }

    #[must_use]
    pub fn settings(&self) -> &ContourSettings {
        &self.settings
    }

    /// Gets the style.
    #[must_use]
    pub fn style(&self) -> ContourStyle {
        self.settings.style
    }

    /// Sets the style.
    pub fn set_style(&mut self, style: ContourStyle) -> &mut Self {
        if style != self.settings.style {
            self.settings.style = style;
            self.cache.invalidate();
        }
        self
    }

    /// Gets the placement.
    #[must_use]
    pub fn placement(&self) -> ContourPlacement {
        self.settings.placement
    }

    /// Sets the placement.
    pub fn set_placement(&mut self, placement: ContourPlacement) -> &mut Self {
        if placement != self.settings.placement {
            self.settings.placement = placement;
            self.cache.invalidate();
        }
        self
    }

    /// Gets the color function.
    #[must_use]
    pub fn color(&self) -> &CellColor {
        &self.settings.color
    }

    /// Sets the color function.
    pub fn set_color(&mut self, color: CellColor) -> &mut Self {
        self.settings.color = color;
        self.cache.invalidate();
        self
    }

    /// Re-extracts the buffer if the threshold, settings or field changed.
    ///
    /// Returns true if an extraction ran.
    pub fn update(&mut self) -> bool {
        let Self {
            field,
            threshold,
            settings,
            cache,
            ..
        } = self;
        cache.refresh(*threshold, field.generation(), |out| {
            marching_squares(&*field, *threshold, &*settings, out)
        })
    }

    /// Returns the up-to-date vertex buffer, re-extracting if needed.
    pub fn vertices(&mut self) -> &[ContourVertex] {
        self.update();
        self.cache.vertices()
    }

    /// Returns the buffer as of the last extraction without refreshing it.
    #[must_use]
    pub fn cached_vertices(&self) -> &[ContourVertex] {
        self.cache.vertices()
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

    fn z_range(&self) -> (f32, f32) {
        match self.settings.placement {
            ContourPlacement::Plane(z) => (z, z),
            ContourPlacement::Surface { depth_scale } => {
                let (min, max) = self.field.scalars().range();
                let (a, b) = (min * depth_scale, max * depth_scale);
                (a.min(b), a.max(b))
            }
        }
    }
}

impl Structure for Contour {
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
        "Contour"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let (min, max) = self.field.bounds();
        let (z_min, z_max) = self.z_range();
        Some((min.extend(z_min), max.extend(z_max)))
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
        Contour::set_threshold(self, threshold);
    }

    fn update(&mut self) -> bool {
        Contour::update(self)
    }

    fn vertex_bytes(&self) -> &[u8] {
        self.cache.bytes()
    }

    fn vertex_count(&self) -> usize {
        self.cache.vertices().len()
    }
}
