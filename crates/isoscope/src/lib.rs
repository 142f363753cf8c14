//! isoscope: iso-level geometry for scalar fields.
//!
//! Register a 2D grid to get contour lines, or a 3D grid to get an
//! isosurface. Each structure keeps a render-ready vertex buffer for its
//! current threshold and regenerates it only when the threshold, the field,
//! or its coloring changes.
//!
//! # Quick Start
//!
//! ```no_run
//! use isoscope::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!
//!     // A 64^3 sampling of the distance from the origin
//!     let field = Grid3::uniform(
//!         |x, y, z| (x * x + y * y + z * z).sqrt(),
//!         UVec3::splat(64),
//!         Vec3::splat(-1.0),
//!         Vec3::splat(1.0),
//!     )?;
//!     let sphere = register_isosurface("sphere", std::sync::Arc::new(field))?;
//!     sphere.set_threshold(0.5);
//!
//!     // Once per frame
//!     update();
//!     let triangles = sphere.vertex_count() / 3;
//!     println!("{triangles} triangles");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Structures
//!
//! - [`Contour`] - marching squares over a [`Grid2`]
//! - [`Isosurface`] - marching cubes over a [`Grid3`]

/// Generates the name-keyed lookup functions for one structure type.
macro_rules! impl_structure_accessors {
    (
        get_fn = $get_fn:ident,
        with_fn = $with_fn:ident,
        with_ref_fn = $with_ref_fn:ident,
        handle = $handle:ident,
        type_name = $type_name:literal,
        rust_type = $rust_type:ty,
        doc_name = $doc_name:literal
    ) => {
        #[doc = concat!("Gets a registered ", $doc_name, " by name.")]
        #[must_use]
        pub fn $get_fn(name: &str) -> Option<$handle> {
            $crate::with_context(|ctx| {
                ctx.registry.contains($type_name, name).then(|| $handle {
                    name: name.to_string(),
                })
            })
        }

        #[doc = concat!("Executes a closure with mutable access to a registered ", $doc_name, ".")]
        ///
        /// Returns `None` if no structure of that name exists.
        pub fn $with_fn<F, R>(name: &str, f: F) -> Option<R>
        where
            F: FnOnce(&mut $rust_type) -> R,
        {
            $crate::with_context_mut(|ctx| {
                ctx.registry
                    .get_mut($type_name, name)
                    .and_then(|s| s.as_any_mut().downcast_mut::<$rust_type>())
                    .map(f)
            })
        }

        #[doc = concat!("Executes a closure with read access to a registered ", $doc_name, ".")]
        ///
        /// Returns `None` if no structure of that name exists.
        pub fn $with_ref_fn<F, R>(name: &str, f: F) -> Option<R>
        where
            F: FnOnce(&$rust_type) -> R,
        {
            $crate::with_context(|ctx| {
                ctx.registry
                    .get($type_name, name)
                    .and_then(|s| s.as_any().downcast_ref::<$rust_type>())
                    .map(f)
            })
        }
    };
}

mod contour;
mod init;
mod isosurface;

pub use contour::{
    get_contour, register_contour, register_slice_contour, with_contour, with_contour_ref,
    ContourHandle,
};
pub use init::{init, is_initialized, shutdown};
pub use isosurface::{
    get_isosurface, register_isosurface, register_voxels, with_isosurface, with_isosurface_ref,
    IsosurfaceHandle,
};

// Re-export core types
pub use isoscope_core::{
    error::{IsoscopeError, Result},
    field::{Axis, Field2, Field3, Grid2, Grid3, SampleError, ScalarField, SlicePlane},
    options::Options,
    registry::Registry,
    state::{with_context, with_context_mut, Context},
    structure::Structure,
    ColorMap, ColorMapRegistry, UVec3, Vec2, Vec3, Vec4,
};

// Re-export structures
pub use isoscope_structures::{
    CellColor, Contour, ContourPlacement, ContourSettings, ContourStyle, ContourVertex,
    ExtractionStats, Isosurface, MeshVertex, ValueColor,
};

/// Refreshes every enabled structure whose vertex buffer is stale.
///
/// Call once per frame. Returns the number of structures that re-extracted.
pub fn update() -> usize {
    with_context_mut(|ctx| {
        let refreshed = ctx.registry.update_all();
        if refreshed > 0 {
            ctx.update_extents();
        }
        refreshed
    })
}

/// Removes a structure by name.
pub fn remove_structure(name: &str) {
    with_context_mut(|ctx| {
        ctx.registry.remove("Contour", name);
        ctx.registry.remove("Isosurface", name);
        ctx.update_extents();
    });
}

/// Removes all structures.
pub fn remove_all_structures() {
    with_context_mut(|ctx| {
        ctx.registry.clear();
        ctx.update_extents();
    });
}

/// Returns a copy of the global options.
#[must_use]
pub fn options() -> Options {
    with_context(|ctx| ctx.options.clone())
}

/// Replaces the global options.
///
/// The options apply to structures registered afterwards.
pub fn set_options(options: Options) -> Result<()> {
    options.validate()?;
    with_context_mut(|ctx| ctx.options = options);
    Ok(())
}

/// Returns the bounding box of all registered structures.
#[must_use]
pub fn bounding_box() -> (Vec3, Vec3) {
    with_context(|ctx| ctx.bounding_box)
}

/// Returns the center of the bounding box of all registered structures.
#[must_use]
pub fn center() -> Vec3 {
    with_context(Context::center)
}

/// Returns the length of the diagonal of the scene bounding box.
#[must_use]
pub fn length_scale() -> f32 {
    with_context(|ctx| ctx.length_scale)
}
