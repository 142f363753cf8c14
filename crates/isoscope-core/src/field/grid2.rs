//! 2D grids with quad cells.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use super::{infallible2, sanitize, Axis, Grid3, SampleError, SampleFn2, ScalarField, SlicePlane};
use crate::error::{IsoscopeError, Result};
use crate::scalars::ScalarAttributes;

#[derive(Clone)]
enum Source2 {
    Samples,
    Function(SampleFn2),
    Slice { field: Arc<Grid3>, plane: SlicePlane },
}

impl fmt::Debug for Source2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Samples => f.write_str("Samples"),
            Self::Function(_) => f.write_str("Function"),
            Self::Slice { plane, .. } => f.debug_struct("Slice").field("plane", plane).finish(),
        }
    }
}

/// A 2D grid of scalar samples.
///
/// Points are numbered row by row: point `i` sits at column `i % nx` and row
/// `i / nx`. Cell `i` has its lower-left corner at column `i % (nx - 1)`,
/// row `i / (nx - 1)`, and lists its corners counter-clockwise:
///
/// ```text
///   3 ------- 2
///   |         |
///   |         |
///   0 ------- 1
/// ```
#[derive(Debug, Clone)]
pub struct Grid2 {
    x: Axis,
    y: Axis,
    source: Source2,
    scalars: ScalarAttributes,
    generation: u64,
}

impl Grid2 {
    /// Samples `f` at every grid point.
    ///
    /// Non-finite results are stored as `+inf`.
    pub fn from_fn<F>(x: Axis, y: Axis, f: F) -> Self
    where
        F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
    {
        Self::build(x, y, Source2::Function(infallible2(f)))
    }

    /// Samples a fallible function at every grid point.
    ///
    /// Points where `f` fails are stored as `+inf`.
    pub fn try_from_fn<F>(x: Axis, y: Axis, f: F) -> Self
    where
        F: Fn(f32, f32) -> std::result::Result<f32, SampleError> + Send + Sync + 'static,
    {
        Self::build(x, y, Source2::Function(Arc::new(f)))
    }

    /// Creates a grid over stored samples, given row by row.
    pub fn from_samples(x: Axis, y: Axis, values: Vec<f32>) -> Result<Self> {
        let expected = x.len() * y.len();
        if values.len() != expected {
            return Err(IsoscopeError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let values = values
            .into_iter()
            .map(|v| sanitize(Ok(v)).0)
            .collect();
        Ok(Self {
            x,
            y,
            source: Source2::Samples,
            scalars: ScalarAttributes::from_values(values),
            generation: 0,
        })
    }

    /// Samples a 3D field on a plane.
    ///
    /// `u` and `v` give the sample positions along the plane's in-plane axes.
    #[must_use]
    pub fn slice(field: Arc<Grid3>, plane: SlicePlane, u: Axis, v: Axis) -> Self {
        Self::build(u, v, Source2::Slice { field, plane })
    }

    /// Uniform grid of `nx * ny` samples of `f` over `[min, max]`.
    pub fn uniform<F>(f: F, nx: usize, ny: usize, min: Vec2, max: Vec2) -> Result<Self>
    where
        F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
    {
        let x = Axis::uniform(min.x, max.x, nx)?;
        let y = Axis::uniform(min.y, max.y, ny)?;
        Ok(Self::from_fn(x, y, f))
    }

    /// Rectilinear grid sampling `f` at explicit column and row positions.
    pub fn rectilinear<F>(f: F, xs: Vec<f32>, ys: Vec<f32>) -> Result<Self>
    where
        F: Fn(f32, f32) -> f32 + Send + Sync + 'static,
    {
        let x = Axis::rectilinear(xs)?;
        let y = Axis::rectilinear(ys)?;
        Ok(Self::from_fn(x, y, f))
    }

    fn build(x: Axis, y: Axis, source: Source2) -> Self {
        let len = x.len() * y.len();
        let mut grid = Self {
            x,
            y,
            source,
            scalars: ScalarAttributes::zeroed(len),
            generation: 0,
        };
        grid.resample();
        grid
    }

    /// Returns the column and row axes.
    #[must_use]
    pub fn axes(&self) -> (&Axis, &Axis) {
        (&self.x, &self.y)
    }

    /// Returns the number of samples per axis.
    #[must_use]
    pub fn dims(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    /// Returns true if the grid stores samples without a sampling function.
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        matches!(self.source, Source2::Samples)
    }

    /// Flattens a (column, row) pair to a point index.
    #[must_use]
    pub fn point_index(&self, col: usize, row: usize) -> usize {
        row * self.x.len() + col
    }

    /// Returns the lower-left and upper-right corners of the grid.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.x.min(), self.y.min()),
            Vec2::new(self.x.max(), self.y.max()),
        )
    }

    /// Replaces the sample positions.
    ///
    /// Function-backed and sliced grids are resampled. Stored-sample grids
    /// keep their samples and require the same per-axis counts.
    pub fn set_axes(&mut self, x: Axis, y: Axis) -> Result<()> {
        let expected = self.x.len() * self.y.len();
        let actual = x.len() * y.len();
        if self.is_sampled() && (x.len() != self.x.len() || y.len() != self.y.len()) {
            return Err(IsoscopeError::SizeMismatch { expected, actual });
        }
        self.x = x;
        self.y = y;
        if self.is_sampled() {
            self.generation = self.generation.wrapping_add(1);
        } else {
            self.resample();
        }
        Ok(())
    }

    /// Moves the grid without resampling.
    pub fn translate(&mut self, offset: Vec2) {
        self.x.translate(offset.x);
        self.y.translate(offset.y);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Overwrites the scalar at point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_sample(&mut self, index: usize, value: f32) {
        self.scalars.set(index, sanitize(Ok(value)).0);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Re-evaluates every point from the grid's source.
    ///
    /// Stored-sample grids are left untouched. Returns the number of points
    /// that failed to evaluate.
    pub fn resample(&mut self) -> usize {
        if self.is_sampled() {
            return 0;
        }
        let mut degenerate = 0;
        let values = (0..self.num_points())
            .map(|i| {
                let (value, failed) = sanitize(self.sample_source(self.point(i)));
                degenerate += usize::from(failed);
                value
            })
            .collect();
        self.scalars = ScalarAttributes::from_values(values);
        if degenerate > 0 {
            log::warn!(
                "{degenerate} of {} grid samples failed to evaluate and were stored as +inf",
                self.num_points()
            );
        }
        self.generation = self.generation.wrapping_add(1);
        degenerate
    }

    fn sample_source(&self, p: Vec2) -> std::result::Result<f32, SampleError> {
        match &self.source {
            Source2::Samples => Ok(self.interpolate(p)),
            Source2::Function(f) => f(p.x, p.y),
            Source2::Slice { field, plane } => Ok(field.evaluate(plane.to_world(p))),
        }
    }

    fn interpolate(&self, p: Vec2) -> f32 {
        let (Some((cx, tx)), Some((cy, ty))) = (self.x.locate(p.x), self.y.locate(p.y)) else {
            return f32::INFINITY;
        };
        let corners = self.cell(cy * self.x.num_cells() + cx);
        let v = corners.map(|i| self.scalars.get(i));
        if v.iter().any(|v| !v.is_finite()) {
            return f32::INFINITY;
        }
        let bottom = v[0] + (v[1] - v[0]) * tx;
        let top = v[3] + (v[2] - v[3]) * tx;
        bottom + (top - bottom) * ty
    }
}

impl ScalarField for Grid2 {
    type Coord = Vec2;
    type Cell = [usize; 4];

    fn num_points(&self) -> usize {
        self.x.len() * self.y.len()
    }

    fn num_cells(&self) -> usize {
        self.x.num_cells() * self.y.num_cells()
    }

    fn point(&self, index: usize) -> Vec2 {
        let nx = self.x.len();
        Vec2::new(self.x.coord(index % nx), self.y.coord(index / nx))
    }

    fn cell(&self, index: usize) -> [usize; 4] {
        let nx = self.x.len();
        let row = index / self.x.num_cells();
        let c0 = index + row;
        [c0, c0 + 1, c0 + 1 + nx, c0 + nx]
    }

    fn find_cell(&self, coord: Vec2) -> Option<usize> {
        let (cx, _) = self.x.locate(coord.x)?;
        let (cy, _) = self.y.locate(coord.y)?;
        Some(cy * self.x.num_cells() + cx)
    }

    fn evaluate(&self, coord: Vec2) -> f32 {
        sanitize(self.sample_source(coord)).0
    }

    fn scalars(&self) -> &ScalarAttributes {
        &self.scalars
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
