//! Pluggable color functions for contours and isosurfaces.

use std::fmt;
use std::sync::Arc;

use glam::{Vec3, Vec4};
use isoscope_core::ColorMap;

/// Color assigned to each contour cell.
///
/// Evaluated once per crossing cell from its four corner scalars and the
/// threshold.
#[derive(Clone)]
pub enum CellColor {
    /// The same color for every cell.
    Fixed(Vec4),
    /// A function of the corner scalars and the threshold.
    Custom(Arc<dyn Fn(&[f32; 4], f32) -> Vec4 + Send + Sync>),
}

impl CellColor {
    /// Wraps a closure as a cell color function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[f32; 4], f32) -> Vec4 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Resolves the color of one cell.
    #[must_use]
    pub fn color(&self, corners: &[f32; 4], threshold: f32) -> Vec4 {
        match self {
            Self::Fixed(color) => *color,
            Self::Custom(f) => f(corners, threshold),
        }
    }
}

impl Default for CellColor {
    fn default() -> Self {
        Self::Fixed(Vec4::new(0.0, 0.0, 1.0, 1.0))
    }
}

impl From<Vec4> for CellColor {
    fn from(color: Vec4) -> Self {
        Self::Fixed(color)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(color) => f.debug_tuple("Fixed").field(color).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Color as a function of a value normalized into `[0, 1]`.
#[derive(Clone)]
pub enum ValueColor {
    /// The same color for every value.
    Fixed(Vec4),
    /// An opaque sample of a color map.
    Map(ColorMap),
    /// A custom function of the normalized value.
    Custom(Arc<dyn Fn(f32) -> Vec4 + Send + Sync>),
}

impl ValueColor {
    /// Wraps a closure as a value color function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> Vec4 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Translucent blue-green-red ramp with alpha 0.1.
    #[must_use]
    pub fn rainbow_translucent() -> Self {
        Self::custom(|t| {
            let d = (t * 6.0).clamp(0.8, 5.2);
            let r = ((3.0 - (d - 4.0).abs() - (d - 5.0).abs()) / 12.0).max(0.0);
            let g = ((4.0 - (d - 2.0).abs() - (d - 4.0).abs()) / 12.0).max(0.0);
            let b = ((3.0 - (d - 1.0).abs() - (d - 2.0).abs()) / 12.0).max(0.0);
            Vec3::new(r, g, b).normalize_or_zero().extend(0.1)
        })
    }

    /// Transfer function for 8-bit CT volumes: faint green foliage fading
    /// into opaque brown wood as the value rises.
    #[must_use]
    pub fn bonsai() -> Self {
        Self::custom(|t| {
            let d = t * 255.0;
            let r = (0.396 * (d - 30.0) / 48.0).clamp(0.0, 1.0);
            let g = (1.0 + 0.75 * (30.0 - d) / 48.0).clamp(0.0, 1.0);
            let b = (0.129 * (d - 30.0) / 48.0).clamp(0.0, 1.0);
            let a = (0.75 * (d - 10.5) / 48.0).clamp(0.0, 1.0);
            Vec3::new(r, g, b).normalize_or_zero().extend(a)
        })
    }

    /// Resolves the color of a normalized value.
    #[must_use]
    pub fn color(&self, t: f32) -> Vec4 {
        match self {
            Self::Fixed(color) => *color,
            Self::Map(map) => map.sample_rgba(t, 1.0),
            Self::Custom(f) => f(t),
        }
    }

    /// Samples `resolution` evenly spaced colors over `[0, 1]`.
    ///
    /// A resolution of 1 samples 0 only; 0 yields an empty table.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lookup_table(&self, resolution: usize) -> Vec<Vec4> {
        let denom = resolution.saturating_sub(1).max(1) as f32;
        (0..resolution)
            .map(|i| self.color(i as f32 / denom))
            .collect()
    }
}

impl Default for ValueColor {
    fn default() -> Self {
        Self::Fixed(Vec4::new(1.0, 0.0, 0.0, 1.0))
    }
}

impl fmt::Debug for ValueColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(color) => f.debug_tuple("Fixed").field(color).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(&map.name).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CellColor::default().color(&[0.0; 4], 0.0), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(ValueColor::default().color(0.3), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_custom_cell_color_sees_corners() {
        let color = CellColor::custom(|corners, t| Vec4::splat(corners[2] - t));
        assert_eq!(color.color(&[0.0, 0.0, 3.0, 0.0], 1.0), Vec4::splat(2.0));
    }

    #[test]
    fn test_rainbow_is_translucent_and_unit() {
        let color = ValueColor::rainbow_translucent();
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let c = color.color(t);
            assert!((c.w - 0.1).abs() < 1e-6);
            assert!((c.truncate().length() - 1.0).abs() < 1e-5, "t = {t}");
        }
        // Low values are blue, high values red.
        let low = color.color(0.0);
        let high = color.color(1.0);
        assert!(low.z > low.x);
        assert!(high.x > high.z);
    }

    #[test]
    fn test_bonsai_alpha_ramps_up() {
        let color = ValueColor::bonsai();
        assert_eq!(color.color(0.0).w, 0.0);
        assert_eq!(color.color(1.0).w, 1.0);
        let foliage = color.color(30.0 / 255.0);
        assert!(foliage.y > foliage.x);
    }

    #[test]
    fn test_lookup_table_spans_range() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        let table = ValueColor::Map(map).lookup_table(32);
        assert_eq!(table.len(), 32);
        assert_eq!(table[0], Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(table[31], Vec4::ONE);
        assert_eq!(ValueColor::default().lookup_table(1).len(), 1);
        assert!(ValueColor::default().lookup_table(0).is_empty());
    }
}
