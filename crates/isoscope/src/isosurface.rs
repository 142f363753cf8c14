//! Isosurface registration and manipulation.

use std::sync::Arc;

use crate::{
    with_context, with_context_mut, Grid3, Isosurface, Result, Structure, UVec3, ValueColor, Vec3,
};

/// Registers an isosurface over a 3D grid.
///
/// The surface starts at the midpoint of the field's range and is colored
/// with the color map named in the global [`Options`](crate::Options).
pub fn register_isosurface(name: impl Into<String>, field: Arc<Grid3>) -> Result<IsosurfaceHandle> {
    let name = name.into();
    with_context_mut(|ctx| {
        let mut surface = Isosurface::new(name.clone(), field);
        if let Some(map) = ctx.color_maps.get_or_default(&ctx.options.isosurface_color_map) {
            surface.set_color(ValueColor::Map(map.clone()));
        }
        surface.set_lookup_resolution(ctx.options.color_lookup_resolution);
        ctx.registry.register(Box::new(surface))?;
        ctx.update_extents();
        Ok(IsosurfaceHandle { name })
    })
}

/// Registers an isosurface over raw voxel data.
///
/// `voxels` holds `dims.x * dims.y * dims.z` samples in x-fastest order,
/// spaced `scale` apart along each axis.
pub fn register_voxels<T>(
    name: impl Into<String>,
    dims: UVec3,
    voxels: &[T],
    scale: Vec3,
) -> Result<IsosurfaceHandle>
where
    T: Copy + Into<f32>,
{
    let field = Grid3::from_voxels(dims, voxels, scale)?;
    register_isosurface(name, Arc::new(field))
}

impl_structure_accessors! {
    get_fn = get_isosurface,
    with_fn = with_isosurface,
    with_ref_fn = with_isosurface_ref,
    handle = IsosurfaceHandle,
    type_name = "Isosurface",
    rust_type = Isosurface,
    doc_name = "isosurface"
}

/// Handle for a registered isosurface.
#[derive(Clone)]
pub struct IsosurfaceHandle {
    name: String,
}

impl IsosurfaceHandle {
    /// Returns the name of this isosurface.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the threshold.
    pub fn set_threshold(&self, threshold: f32) -> &Self {
        with_isosurface(&self.name, |s| {
            s.set_threshold(threshold);
        });
        self
    }

    /// Returns the threshold, or `None` if the isosurface was removed.
    #[must_use]
    pub fn threshold(&self) -> Option<f32> {
        with_isosurface_ref(&self.name, Isosurface::threshold)
    }

    /// Raises the threshold by the configured step.
    pub fn raise_threshold(&self) -> &Self {
        let step = with_context(|ctx| ctx.options.threshold_step);
        with_isosurface(&self.name, |s| {
            s.step_threshold(step);
        });
        self
    }

    /// Lowers the threshold by the configured step.
    pub fn lower_threshold(&self) -> &Self {
        let step = with_context(|ctx| ctx.options.threshold_step);
        with_isosurface(&self.name, |s| {
            s.step_threshold(-step);
        });
        self
    }

    /// Sets the color function.
    pub fn set_color(&self, color: ValueColor) -> &Self {
        with_isosurface(&self.name, |s| {
            s.set_color(color);
        });
        self
    }

    /// Colors the surface with a registered color map.
    ///
    /// Unknown names fall back to the default map.
    pub fn set_color_map(&self, name: &str) -> &Self {
        let map = with_context(|ctx| ctx.color_maps.get_or_default(name).cloned());
        if let Some(map) = map {
            self.set_color(ValueColor::Map(map));
        }
        self
    }

    /// Sets whether the isosurface takes part in [`update`](crate::update).
    pub fn set_enabled(&self, enabled: bool) -> &Self {
        with_isosurface(&self.name, |s| s.set_enabled(enabled));
        self
    }

    /// Number of vertices in the cached buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        with_isosurface_ref(&self.name, <Isosurface as Structure>::vertex_count).unwrap_or(0)
    }

    /// Number of extractions run so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        with_isosurface_ref(&self.name, Isosurface::recompute_count).unwrap_or(0)
    }
}
