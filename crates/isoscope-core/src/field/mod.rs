//! Scalar fields sampled on 2D and 3D grids.
//!
//! Every grid implements [`ScalarField`]: point and cell enumeration,
//! coordinate lookup, scalar storage, and point location. The concrete grids
//! are [`Grid2`] and [`Grid3`]; each combines per-axis sample positions
//! ([`Axis`], uniform or rectilinear) with a source for its samples (stored
//! values, a sampling function, or a slice through a 3D field).

mod axis;
mod grid2;
mod grid3;
mod slice;

pub use axis::Axis;
pub use grid2::Grid2;
pub use grid3::Grid3;
pub use slice::SlicePlane;

use std::fmt;
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::scalars::ScalarAttributes;

/// Failure reported by a sampling function at one point.
///
/// The sample is stored as `+inf` and the cells touching it never contour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleError(pub String);

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample evaluation failed: {}", self.0)
    }
}

impl std::error::Error for SampleError {}

/// Fallible sampling function for 2D grids.
pub type SampleFn2 = Arc<dyn Fn(f32, f32) -> Result<f32, SampleError> + Send + Sync>;

/// Fallible sampling function for 3D grids.
pub type SampleFn3 = Arc<dyn Fn(f32, f32, f32) -> Result<f32, SampleError> + Send + Sync>;

/// A grid of scalar samples.
pub trait ScalarField {
    /// A position in the grid's space (`Vec2` or `Vec3`).
    type Coord: Copy;

    /// The corner point indices of one cell, in the fixed winding the case
    /// tables expect.
    type Cell: Copy + AsRef<[usize]>;

    /// Returns the number of grid points.
    fn num_points(&self) -> usize;

    /// Returns the number of cells.
    fn num_cells(&self) -> usize;

    /// Returns the coordinates of point `index`.
    fn point(&self, index: usize) -> Self::Coord;

    /// Returns the corner point indices of cell `index`.
    fn cell(&self, index: usize) -> Self::Cell;

    /// Returns the cell containing `coord`, or `None` outside the grid.
    fn find_cell(&self, coord: Self::Coord) -> Option<usize>;

    /// Evaluates the field at an arbitrary position.
    ///
    /// Grids backed by a sampling function call it; grids backed by stored
    /// samples interpolate the containing cell. Failures and positions
    /// outside a stored grid yield `+inf`.
    fn evaluate(&self, coord: Self::Coord) -> f32;

    /// Returns the per-point scalars.
    fn scalars(&self) -> &ScalarAttributes;

    /// Returns a counter that changes whenever samples or geometry change.
    fn generation(&self) -> u64;

    /// Returns the scalar stored at point `index`.
    fn point_scalar(&self, index: usize) -> f32 {
        self.scalars().get(index)
    }

    /// Smallest finite stored scalar.
    fn min(&self) -> f32 {
        self.scalars().min()
    }

    /// Largest finite stored scalar.
    fn max(&self) -> f32 {
        self.scalars().max()
    }
}

/// A 2D field with quad cells.
pub trait Field2: ScalarField<Coord = Vec2, Cell = [usize; 4]> {}

impl<T: ScalarField<Coord = Vec2, Cell = [usize; 4]>> Field2 for T {}

/// A 3D field with voxel cells.
pub trait Field3: ScalarField<Coord = Vec3, Cell = [usize; 8]> {}

impl<T: ScalarField<Coord = Vec3, Cell = [usize; 8]>> Field3 for T {}

/// Converts a sampling result to a stored scalar.
///
/// Errors and non-finite values become `+inf`; returns whether the sample
/// was degenerate.
pub(crate) fn sanitize(sample: Result<f32, SampleError>) -> (f32, bool) {
    match sample {
        Ok(v) if v.is_finite() => (v, false),
        _ => (f32::INFINITY, true),
    }
}

/// Wraps an infallible closure as a sampling function.
pub(crate) fn infallible2<F>(f: F) -> SampleFn2
where
    F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
{
    Arc::new(move |x, y| Ok(f(x, y)))
}

/// Wraps an infallible closure as a sampling function.
pub(crate) fn infallible3<F>(f: F) -> SampleFn3
where
    F: Fn(f32, f32, f32) -> f32 + Send + Sync + 'static,
{
    Arc::new(move |x, y, z| Ok(f(x, y, z)))
}
