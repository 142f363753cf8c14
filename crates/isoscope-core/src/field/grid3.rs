//! 3D grids with voxel cells.

use std::fmt;
use std::sync::Arc;

use glam::{UVec3, Vec3};

use super::{infallible3, sanitize, Axis, SampleError, SampleFn3, ScalarField};
use crate::error::{IsoscopeError, Result};
use crate::scalars::ScalarAttributes;
use crate::tables::CORNER_OFFSETS;

#[derive(Clone)]
enum Source3 {
    Samples,
    Function(SampleFn3),
}

impl fmt::Debug for Source3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Samples => f.write_str("Samples"),
            Self::Function(_) => f.write_str("Function"),
        }
    }
}

/// A 3D grid of scalar samples.
///
/// Points are numbered with x varying fastest: point `(i, j, k)` has index
/// `i + j * nx + k * nx * ny`. Voxel corners follow
/// [`CORNER_OFFSETS`](crate::tables::CORNER_OFFSETS):
///
/// ```text
///     6----7          Y
///    /|   /|          |
///   2----3 |          *-- X
///   | 4--|-5         /
///   |/   |/         Z
///   0----1
/// ```
#[derive(Debug, Clone)]
pub struct Grid3 {
    x: Axis,
    y: Axis,
    z: Axis,
    source: Source3,
    scalars: ScalarAttributes,
    generation: u64,
}

impl Grid3 {
    /// Samples `f` at every grid point.
    pub fn from_fn<F>(x: Axis, y: Axis, z: Axis, f: F) -> Self
    where
        F: Fn(f32, f32, f32) -> f32 + Send + Sync + 'static,
    {
        Self::build(x, y, z, Source3::Function(infallible3(f)))
    }

    /// Samples a fallible function at every grid point.
    pub fn try_from_fn<F>(x: Axis, y: Axis, z: Axis, f: F) -> Self
    where
        F: Fn(f32, f32, f32) -> std::result::Result<f32, SampleError> + Send + Sync + 'static,
    {
        Self::build(x, y, z, Source3::Function(Arc::new(f)))
    }

    /// Uniform grid of `dims` samples of `f` over the box `[min, max]`.
    pub fn uniform<F>(f: F, dims: UVec3, min: Vec3, max: Vec3) -> Result<Self>
    where
        F: Fn(f32, f32, f32) -> f32 + Send + Sync + 'static,
    {
        let x = Axis::uniform(min.x, max.x, dims.x as usize)?;
        let y = Axis::uniform(min.y, max.y, dims.y as usize)?;
        let z = Axis::uniform(min.z, max.z, dims.z as usize)?;
        Ok(Self::from_fn(x, y, z, f))
    }

    /// Creates a grid over stored samples in x-fastest order.
    pub fn from_samples(x: Axis, y: Axis, z: Axis, values: Vec<f32>) -> Result<Self> {
        let expected = x.len() * y.len() * z.len();
        if values.len() != expected {
            return Err(IsoscopeError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let values = values.into_iter().map(|v| sanitize(Ok(v)).0).collect();
        Ok(Self {
            x,
            y,
            z,
            source: Source3::Samples,
            scalars: ScalarAttributes::from_values(values),
            generation: 0,
        })
    }

    /// Creates a grid from raw voxel data.
    ///
    /// Voxel `(i, j, k)` sits at `(i, j, k) * scale`, so `scale` carries the
    /// per-axis spacing of the scanned volume.
    pub fn from_voxels<T>(dims: UVec3, voxels: &[T], scale: Vec3) -> Result<Self>
    where
        T: Copy + Into<f32>,
    {
        let extent = dims.saturating_sub(UVec3::ONE).as_vec3() * scale;
        let x = Axis::uniform(0.0, extent.x, dims.x as usize)?;
        let y = Axis::uniform(0.0, extent.y, dims.y as usize)?;
        let z = Axis::uniform(0.0, extent.z, dims.z as usize)?;
        Self::from_samples(x, y, z, voxels.iter().map(|&v| v.into()).collect())
    }

    fn build(x: Axis, y: Axis, z: Axis, source: Source3) -> Self {
        let len = x.len() * y.len() * z.len();
        let mut grid = Self {
            x,
            y,
            z,
            source,
            scalars: ScalarAttributes::zeroed(len),
            generation: 0,
        };
        grid.resample();
        grid
    }

    /// Returns the x, y and z axes.
    #[must_use]
    pub fn axes(&self) -> (&Axis, &Axis, &Axis) {
        (&self.x, &self.y, &self.z)
    }

    /// Returns the number of samples per axis.
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.x.len(), self.y.len(), self.z.len())
    }

    /// Returns true if the grid stores samples without a sampling function.
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        matches!(self.source, Source3::Samples)
    }

    /// Flattens a 3D point index to a linear index.
    #[must_use]
    pub fn point_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.x.len() + k * self.x.len() * self.y.len()
    }

    /// Flattens a 3D cell index to a linear index.
    #[must_use]
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.x.num_cells() + k * self.x.num_cells() * self.y.num_cells()
    }

    /// Returns the minimum and maximum corners of the grid.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (
            Vec3::new(self.x.min(), self.y.min(), self.z.min()),
            Vec3::new(self.x.max(), self.y.max(), self.z.max()),
        )
    }

    /// Replaces the sample positions, resampling function-backed grids.
    pub fn set_axes(&mut self, x: Axis, y: Axis, z: Axis) -> Result<()> {
        if self.is_sampled()
            && (x.len() != self.x.len() || y.len() != self.y.len() || z.len() != self.z.len())
        {
            return Err(IsoscopeError::SizeMismatch {
                expected: self.num_points(),
                actual: x.len() * y.len() * z.len(),
            });
        }
        self.x = x;
        self.y = y;
        self.z = z;
        if self.is_sampled() {
            self.generation = self.generation.wrapping_add(1);
        } else {
            self.resample();
        }
        Ok(())
    }

    /// Moves the grid without resampling.
    pub fn translate(&mut self, offset: Vec3) {
        self.x.translate(offset.x);
        self.y.translate(offset.y);
        self.z.translate(offset.z);
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

    /// Re-evaluates every point from the sampling function.
    ///
    /// Returns the number of points that failed to evaluate.
    pub fn resample(&mut self) -> usize {
        let Source3::Function(f) = &self.source else {
            return 0;
        };
        let mut degenerate = 0;
        let values = (0..self.num_points())
            .map(|i| {
                let p = self.point(i);
                let (value, failed) = sanitize(f(p.x, p.y, p.z));
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

    fn interpolate(&self, p: Vec3) -> f32 {
        let (Some((ci, u)), Some((cj, v)), Some((ck, w))) =
            (self.x.locate(p.x), self.y.locate(p.y), self.z.locate(p.z))
        else {
            return f32::INFINITY;
        };
        let corners = self.cell(self.cell_index(ci, cj, ck));
        let mut value = 0.0;
        for (corner, offset) in corners.iter().zip(CORNER_OFFSETS) {
            let s = self.scalars.get(*corner);
            if !s.is_finite() {
                return f32::INFINITY;
            }
            let wx = if offset.x == 1 { u } else { 1.0 - u };
            let wy = if offset.y == 1 { v } else { 1.0 - v };
            let wz = if offset.z == 1 { w } else { 1.0 - w };
            value += s * wx * wy * wz;
        }
        value
    }
}

impl ScalarField for Grid3 {
    type Coord = Vec3;
    type Cell = [usize; 8];

    fn num_points(&self) -> usize {
        self.x.len() * self.y.len() * self.z.len()
    }

    fn num_cells(&self) -> usize {
        self.x.num_cells() * self.y.num_cells() * self.z.num_cells()
    }

    fn point(&self, index: usize) -> Vec3 {
        let nx = self.x.len();
        let ny = self.y.len();
        Vec3::new(
            self.x.coord(index % nx),
            self.y.coord((index / nx) % ny),
            self.z.coord(index / (nx * ny)),
        )
    }

    fn cell(&self, index: usize) -> [usize; 8] {
        let cx = self.x.num_cells();
        let cy = self.y.num_cells();
        let i = index % cx;
        let j = (index / cx) % cy;
        let k = index / (cx * cy);
        let base = self.point_index(i, j, k);
        let row = self.x.len();
        let slab = self.x.len() * self.y.len();
        CORNER_OFFSETS.map(|o| base + o.x as usize + o.y as usize * row + o.z as usize * slab)
    }

    fn find_cell(&self, coord: Vec3) -> Option<usize> {
        let (i, _) = self.x.locate(coord.x)?;
        let (j, _) = self.y.locate(coord.y)?;
        let (k, _) = self.z.locate(coord.z)?;
        Some(self.cell_index(i, j, k))
    }

    fn evaluate(&self, coord: Vec3) -> f32 {
        match &self.source {
            Source3::Samples => self.interpolate(coord),
            Source3::Function(f) => sanitize(f(coord.x, coord.y, coord.z)).0,
        }
    }

    fn scalars(&self) -> &ScalarAttributes {
        &self.scalars
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius_grid(n: u32) -> Grid3 {
        Grid3::uniform(
            |x, y, z| (x * x + y * y + z * z).sqrt(),
            UVec3::splat(n),
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let g = radius_grid(4);
        assert_eq!(g.num_points(), 64);
        assert_eq!(g.num_cells(), 27);
    }

    #[test]
    fn test_point_indexing_x_fastest() {
        let g = radius_grid(3);
        assert_eq!(g.point(0), Vec3::splat(-1.0));
        assert_eq!(g.point(1), Vec3::new(0.0, -1.0, -1.0));
        assert_eq!(g.point(3), Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(g.point(9), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(g.point(g.point_index(1, 1, 1)), Vec3::ZERO);
    }

    #[test]
    fn test_cell_corners_follow_offsets() {
        let g = radius_grid(3);
        let corners = g.cell(g.cell_index(1, 0, 1));
        let base = g.point(corners[0]);
        for (corner, offset) in corners.iter().zip(CORNER_OFFSETS) {
            let p = g.point(*corner);
            assert!((p - (base + offset.as_vec3())).length() < 1e-6);
        }
    }

    #[test]
    fn test_find_cell() {
        let g = radius_grid(3);
        assert_eq!(g.find_cell(Vec3::splat(-0.5)), Some(0));
        assert_eq!(g.find_cell(Vec3::new(0.5, -0.5, 0.5)), Some(g.cell_index(1, 0, 1)));
        assert_eq!(g.find_cell(Vec3::splat(1.0)), Some(7));
        assert_eq!(g.find_cell(Vec3::new(0.0, 0.0, 1.5)), None);
    }

    #[test]
    fn test_from_voxels_scale() {
        let voxels: Vec<u8> = (0..8).collect();
        let g = Grid3::from_voxels(UVec3::splat(2), &voxels, Vec3::new(1.0, 2.0, 0.5)).unwrap();
        assert_eq!(g.bounds().1, Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(g.point_scalar(7), 7.0);
        assert_eq!(g.max(), 7.0);
        // Trilinear center of 0..8 (x-fastest) is the mean.
        assert!((g.evaluate(Vec3::new(0.5, 1.0, 0.25)) - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_from_voxels_size_mismatch() {
        let voxels = [0u8; 7];
        assert!(matches!(
            Grid3::from_voxels(UVec3::splat(2), &voxels, Vec3::ONE),
            Err(IsoscopeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_function_grid_evaluates_directly() {
        let g = radius_grid(3);
        assert!((g.evaluate(Vec3::new(0.3, 0.4, 0.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_set_sample_bumps_generation() {
        let mut g = radius_grid(2);
        let before = g.generation();
        g.set_sample(0, 10.0);
        assert_ne!(g.generation(), before);
        assert_eq!(g.max(), 10.0);
    }
}
