//! Configuration options for isoscope.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::color_maps::DEFAULT_COLOR_MAP;
use crate::error::{IsoscopeError, Result};

/// Defaults applied to newly registered structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Color of contour segments.
    pub contour_color: Vec4,

    /// Color map used for isosurfaces.
    pub isosurface_color_map: String,

    /// Height multiplier lifting contours above the field surface.
    pub contour_depth_scale: f32,

    /// Threshold increment used by `step_threshold`.
    pub threshold_step: f32,

    /// Number of entries in an isosurface color lookup table.
    pub color_lookup_resolution: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            contour_color: Vec4::new(0.0, 0.0, 1.0, 1.0),
            isosurface_color_map: DEFAULT_COLOR_MAP.to_string(),
            contour_depth_scale: 1.005,
            threshold_step: 0.05,
            color_lookup_resolution: 32,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.contour_color.is_finite() {
            return Err(invalid("contour_color", "components must be finite"));
        }
        if self.isosurface_color_map.is_empty() {
            return Err(invalid("isosurface_color_map", "name must not be empty"));
        }
        if !(self.contour_depth_scale.is_finite() && self.contour_depth_scale > 0.0) {
            return Err(invalid("contour_depth_scale", "must be finite and positive"));
        }
        if !(self.threshold_step.is_finite() && self.threshold_step > 0.0) {
            return Err(invalid("threshold_step", "must be finite and positive"));
        }
        if self.color_lookup_resolution < 2 {
            return Err(invalid("color_lookup_resolution", "must be at least 2"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> IsoscopeError {
    IsoscopeError::InvalidOption {
        name,
        reason: reason.to_string(),
    }
}
