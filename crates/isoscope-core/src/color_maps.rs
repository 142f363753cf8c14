//! Named color maps for coloring normalized scalars.

use std::collections::HashMap;

use glam::{Vec3, Vec4};

/// Name of the map used when a requested map does not exist.
pub const DEFAULT_COLOR_MAP: &str = "viridis";

/// Piecewise-linear color ramp over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples, evenly spaced from 0 to 1.
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the map at `t`, clamped to `[0, 1]`.
    ///
    /// NaN samples the start of the map.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.colors.as_slice() {
            [] => Vec3::ZERO,
            [only] => *only,
            colors => {
                let n = colors.len() - 1;
                let scaled = t * n as f32;
                let idx = (scaled.floor() as usize).min(n - 1);
                colors[idx].lerp(colors[idx + 1], scaled - idx as f32)
            }
        }
    }

    /// Samples the map and attaches an alpha channel.
    #[must_use]
    pub fn sample_rgba(&self, t: f32, alpha: f32) -> Vec4 {
        self.sample(t).extend(alpha)
    }
}

/// Registry of color maps, keyed by name.
#[derive(Debug, Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a registry holding the built-in maps.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        for (name, colors) in BUILTIN {
            registry.register(ColorMap::new(*name, colors.to_vec()));
        }
        registry
    }

    /// Registers a color map, replacing any map with the same name.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Gets a color map by name, falling back to [`DEFAULT_COLOR_MAP`].
    ///
    /// Returns `None` only if the default map was never registered.
    #[must_use]
    pub fn get_or_default(&self, name: &str) -> Option<&ColorMap> {
        self.get(name).or_else(|| {
            log::warn!("unknown color map '{name}', using '{DEFAULT_COLOR_MAP}'");
            self.get(DEFAULT_COLOR_MAP)
        })
    }

    /// Returns all color map names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.color_maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

const BUILTIN: &[(&str, &[Vec3])] = &[
    (
        "viridis",
        &[
            Vec3::new(0.267, 0.004, 0.329),
            Vec3::new(0.282, 0.140, 0.457),
            Vec3::new(0.253, 0.265, 0.529),
            Vec3::new(0.206, 0.371, 0.553),
            Vec3::new(0.163, 0.471, 0.558),
            Vec3::new(0.127, 0.566, 0.550),
            Vec3::new(0.134, 0.658, 0.517),
            Vec3::new(0.266, 0.749, 0.440),
            Vec3::new(0.477, 0.821, 0.318),
            Vec3::new(0.741, 0.873, 0.150),
            Vec3::new(0.993, 0.906, 0.144),
        ],
    ),
    (
        "blues",
        &[
            Vec3::new(0.969, 0.984, 1.000),
            Vec3::new(0.871, 0.922, 0.969),
            Vec3::new(0.776, 0.859, 0.937),
            Vec3::new(0.620, 0.792, 0.882),
            Vec3::new(0.419, 0.682, 0.839),
            Vec3::new(0.259, 0.573, 0.776),
            Vec3::new(0.129, 0.443, 0.710),
            Vec3::new(0.031, 0.318, 0.612),
            Vec3::new(0.031, 0.188, 0.420),
        ],
    ),
    (
        "reds",
        &[
            Vec3::new(1.000, 0.961, 0.941),
            Vec3::new(0.996, 0.878, 0.824),
            Vec3::new(0.988, 0.733, 0.631),
            Vec3::new(0.988, 0.573, 0.447),
            Vec3::new(0.984, 0.416, 0.290),
            Vec3::new(0.937, 0.231, 0.173),
            Vec3::new(0.796, 0.094, 0.114),
            Vec3::new(0.647, 0.059, 0.082),
            Vec3::new(0.404, 0.000, 0.051),
        ],
    ),
    (
        "coolwarm",
        &[
            Vec3::new(0.230, 0.299, 0.754),
            Vec3::new(0.552, 0.690, 0.996),
            Vec3::new(0.866, 0.866, 0.866),
            Vec3::new(0.956, 0.604, 0.486),
            Vec3::new(0.706, 0.016, 0.150),
        ],
    ),
    (
        "rainbow",
        &[
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_endpoints() {
        let registry = ColorMapRegistry::new();
        let rainbow = registry.get("rainbow").unwrap();
        assert_eq!(rainbow.sample(0.0), Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(rainbow.sample(1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(rainbow.sample(-3.0), rainbow.sample(0.0));
        assert_eq!(rainbow.sample(7.0), rainbow.sample(1.0));
    }

    #[test]
    fn test_color_map_interpolates() {
        let map = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        assert!((map.sample(0.25) - Vec3::splat(0.25)).length() < 1e-6);
        assert_eq!(map.sample(f32::NAN), Vec3::ZERO);
        assert_eq!(map.sample_rgba(1.0, 0.5), Vec4::new(1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn test_degenerate_maps() {
        assert_eq!(ColorMap::new("empty", vec![]).sample(0.5), Vec3::ZERO);
        assert_eq!(ColorMap::new("one", vec![Vec3::X]).sample(0.5), Vec3::X);
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ColorMapRegistry::new();
        assert_eq!(
            registry.names(),
            vec!["blues", "coolwarm", "rainbow", "reds", "viridis"]
        );
        assert_eq!(registry.get_or_default("nope").unwrap().name, DEFAULT_COLOR_MAP);
    }
}
