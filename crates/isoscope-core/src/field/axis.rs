//! Sample positions along a single grid axis.

use crate::error::{IsoscopeError, Result};

/// Sample positions along one axis of a grid.
///
/// Uniform axes space `count` samples evenly over `[min, max]`; rectilinear
/// axes store each position explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    /// Evenly spaced samples.
    Uniform {
        /// First sample position.
        min: f32,
        /// Last sample position.
        max: f32,
        /// Number of samples.
        count: usize,
    },
    /// Explicit, strictly increasing sample positions.
    Rectilinear(Vec<f32>),
}

impl Axis {
    /// Creates `count` evenly spaced samples over `[min, max]`.
    pub fn uniform(min: f32, max: f32, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(IsoscopeError::InvalidDimensions(count));
        }
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(IsoscopeError::InvalidExtent { min, max });
        }
        Ok(Self::Uniform { min, max, count })
    }

    /// Creates an axis from explicit sample positions.
    pub fn rectilinear(coords: Vec<f32>) -> Result<Self> {
        if coords.len() < 2 {
            return Err(IsoscopeError::InvalidDimensions(coords.len()));
        }
        if let Some(i) = coords.iter().position(|c| !c.is_finite()) {
            return Err(IsoscopeError::NonMonotonicAxis(i));
        }
        if let Some(i) = coords.windows(2).position(|w| w[1] <= w[0]) {
            return Err(IsoscopeError::NonMonotonicAxis(i + 1));
        }
        Ok(Self::Rectilinear(coords))
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Uniform { count, .. } => *count,
            Self::Rectilinear(coords) => coords.len(),
        }
    }

    /// Always false; axes hold at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the number of cells (intervals between samples).
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.len() - 1
    }

    /// Returns the position of sample `i`.
    #[must_use]
    pub fn coord(&self, i: usize) -> f32 {
        match self {
            Self::Uniform { max, count, .. } if i + 1 == *count => *max,
            #[allow(clippy::cast_precision_loss)]
            Self::Uniform { min, max, count } => min + (max - min) * i as f32 / (count - 1) as f32,
            Self::Rectilinear(coords) => coords[i],
        }
    }

    /// First sample position.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.coord(0)
    }

    /// Last sample position.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.coord(self.len() - 1)
    }

    /// Finds the cell containing `x` and the fractional position inside it.
    ///
    /// The upper boundary belongs to the last cell. Returns `None` outside
    /// `[min, max]` or for NaN.
    #[must_use]
    pub fn locate(&self, x: f32) -> Option<(usize, f32)> {
        if !(x >= self.min() && x <= self.max()) {
            return None;
        }
        let last = self.num_cells() - 1;
        let cell = match self {
            Self::Uniform { min, max, count } => {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let c = ((x - min) / (max - min) * (count - 1) as f32).floor() as usize;
                c.min(last)
            }
            Self::Rectilinear(coords) => coords
                .partition_point(|&c| c <= x)
                .saturating_sub(1)
                .min(last),
        };
        let lo = self.coord(cell);
        let hi = self.coord(cell + 1);
        let t = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
        Some((cell, t))
    }

    /// Shifts every sample position by `offset`.
    pub fn translate(&mut self, offset: f32) {
        match self {
            Self::Uniform { min, max, .. } => {
                *min += offset;
                *max += offset;
            }
            Self::Rectilinear(coords) => coords.iter_mut().for_each(|c| *c += offset),
        }
    }
}
