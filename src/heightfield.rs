//! Dense elevation grid.
//!
//! A `width x height` field stores `(width + 1) x (height + 1)` samples so the
//! grid has a vertex on both edges. Indices run over `[0, width] x [0, height]`.

use serde::Serialize;

use crate::error::FieldError;

/// Row-major grid of elevations. Mutated only through [`HeightField::accumulate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeightField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl HeightField {
    /// Allocate a zero-filled field with `(width + 1) x (height + 1)` samples.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width + 1) * (height + 1)],
        }
    }

    /// Largest valid x index.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Largest valid y index.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x <= self.width && y <= self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, FieldError> {
        if !self.contains(x, y) {
            return Err(FieldError {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * (self.width + 1) + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<f32, FieldError> {
        let idx = self.index(x, y)?;
        Ok(self.data[idx])
    }

    /// `field[x][y] += delta`. Never overwrites.
    pub fn accumulate(&mut self, x: usize, y: usize, delta: f32) -> Result<(), FieldError> {
        let idx = self.index(x, y)?;
        self.data[idx] += delta;
        Ok(())
    }

    /// Samples in row-major order (`y` outer, `x` inner).
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over all samples with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let stride = self.width + 1;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &h)| (idx % stride, idx / stride, h))
    }

    /// Lowest and highest elevation in the field.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }
}
