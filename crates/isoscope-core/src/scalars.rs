//! Per-point scalar storage with a running value range.

/// Dense scalar samples, one per grid point.
///
/// The minimum and maximum are tracked as values are assigned so that range
/// queries never scan the array. Non-finite samples (the `+inf` placeholder
/// for failed evaluations) are stored but never widen the range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarAttributes {
    values: Vec<f32>,
    min: f32,
    max: f32,
}

impl ScalarAttributes {
    /// Creates `len` samples, all zero.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        let (min, max) = if len == 0 {
            (f32::INFINITY, f32::NEG_INFINITY)
        } else {
            (0.0, 0.0)
        };
        Self {
            values: vec![0.0; len],
            min,
            max,
        }
    }

    /// Takes ownership of existing samples.
    #[must_use]
    pub fn from_values(values: Vec<f32>) -> Self {
        let mut attributes = Self {
            values,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        };
        attributes.rescan();
        attributes
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Returns all samples.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Assigns the sample at `index`.
    ///
    /// Widening the range is O(1). Overwriting the sample that currently
    /// holds the minimum or maximum with a value inside the range forces a
    /// rescan.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: f32) {
        let old = std::mem::replace(&mut self.values[index], value);

        let covers_min = value.is_finite() && value <= self.min;
        let covers_max = value.is_finite() && value >= self.max;
        let shrinks = old.is_finite()
            && ((old == self.min && !covers_min) || (old == self.max && !covers_max));
        if shrinks {
            self.rescan();
            return;
        }

        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Returns true if at least one sample is finite.
    #[must_use]
    pub fn has_range(&self) -> bool {
        self.min <= self.max
    }

    /// Returns `(min, max)` over the finite samples.
    ///
    /// Falls back to `(0.0, 1.0)` when no sample is finite.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        if self.has_range() {
            (self.min, self.max)
        } else {
            (0.0, 1.0)
        }
    }

    /// Smallest finite sample.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.range().0
    }

    /// Largest finite sample.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.range().1
    }

    /// Maps `value` into `[0, 1]` over the current range.
    ///
    /// A flat range maps everything to `0.5`.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        let (min, max) = self.range();
        let span = max - min;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - min) / span).clamp(0.0, 1.0)
    }

    fn rescan(&mut self) {
        self.min = f32::INFINITY;
        self.max = f32::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| v.is_finite()) {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }
}
