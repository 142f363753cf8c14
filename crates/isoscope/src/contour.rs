//! Contour registration and manipulation.
//!
//! # Example
//!
//! ```no_run
//! use isoscope::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!
//!     let field = Grid2::uniform(
//!         |x, y| (x * 3.0).sin() * (y * 2.0).cos(),
//!         128,
//!         128,
//!         Vec2::splat(-3.0),
//!         Vec2::splat(3.0),
//!     )?;
//!     let contour = register_contour("waves", field)?;
//!     contour.set_threshold(0.25).set_style(ContourStyle::Filled);
//!     update();
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use crate::{
    with_context, with_context_mut, Axis, CellColor, Contour, ContourPlacement, ContourStyle,
    Grid2, Grid3, Result, SlicePlane, Structure,
};

/// Registers a contour over a 2D grid.
///
/// The contour starts at the midpoint of the field's range and takes its
/// color and depth scale from the global [`Options`](crate::Options).
pub fn register_contour(name: impl Into<String>, field: Grid2) -> Result<ContourHandle> {
    let name = name.into();
    with_context_mut(|ctx| {
        let mut contour = Contour::new(name.clone(), field);
        contour
            .set_color(CellColor::Fixed(ctx.options.contour_color))
            .set_placement(ContourPlacement::Surface {
                depth_scale: ctx.options.contour_depth_scale,
            });
        ctx.registry.register(Box::new(contour))?;
        ctx.update_extents();
        Ok(ContourHandle { name })
    })
}

/// Registers a contour over a planar slice of a 3D grid.
///
/// The contour lies flat at height 0 in the plane's `(u, v)` coordinates,
/// sampled at the positions of `u` and `v`.
pub fn register_slice_contour(
    name: impl Into<String>,
    field: Arc<Grid3>,
    plane: SlicePlane,
    u: Axis,
    v: Axis,
) -> Result<ContourHandle> {
    let handle = register_contour(name, Grid2::slice(field, plane, u, v))?;
    handle.set_placement(ContourPlacement::Plane(0.0));
    Ok(handle)
}

impl_structure_accessors! {
    get_fn = get_contour,
    with_fn = with_contour,
    with_ref_fn = with_contour_ref,
    handle = ContourHandle,
    type_name = "Contour",
    rust_type = Contour,
    doc_name = "contour"
}

/// Handle for a registered contour.
#[derive(Clone)]
pub struct ContourHandle {
    name: String,
}

impl ContourHandle {
    /// Returns the name of this contour.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the threshold.
    pub fn set_threshold(&self, threshold: f32) -> &Self {
        with_contour(&self.name, |c| {
            c.set_threshold(threshold);
        });
        self
    }

    /// Returns the threshold, or `None` if the contour was removed.
    #[must_use]
    pub fn threshold(&self) -> Option<f32> {
        with_contour_ref(&self.name, Contour::threshold)
    }

    /// Raises the threshold by the configured step.
    pub fn raise_threshold(&self) -> &Self {
        let step = with_context(|ctx| ctx.options.threshold_step);
        with_contour(&self.name, |c| {
            c.step_threshold(step);
        });
        self
    }

    /// Lowers the threshold by the configured step.
    pub fn lower_threshold(&self) -> &Self {
        let step = with_context(|ctx| ctx.options.threshold_step);
        with_contour(&self.name, |c| {
            c.step_threshold(-step);
        });
        self
    }

    /// Sets the style.
    pub fn set_style(&self, style: ContourStyle) -> &Self {
        with_contour(&self.name, |c| {
            c.set_style(style);
        });
        self
    }

    /// Sets the placement.
    pub fn set_placement(&self, placement: ContourPlacement) -> &Self {
        with_contour(&self.name, |c| {
            c.set_placement(placement);
        });
        self
    }

    /// Sets the color function.
    pub fn set_color(&self, color: impl Into<CellColor>) -> &Self {
        let color = color.into();
        with_contour(&self.name, |c| {
            c.set_color(color);
        });
        self
    }

    /// Sets whether the contour takes part in [`update`](crate::update).
    pub fn set_enabled(&self, enabled: bool) -> &Self {
        with_contour(&self.name, |c| c.set_enabled(enabled));
        self
    }

    /// Number of vertices in the cached buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        with_contour_ref(&self.name, <Contour as Structure>::vertex_count).unwrap_or(0)
    }

    /// Number of extractions run so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        with_contour_ref(&self.name, Contour::recompute_count).unwrap_or(0)
    }
}
