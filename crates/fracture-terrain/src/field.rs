//! Square scalar field stored row-major.

use rayon::prelude::*;

use crate::error::MapGenError;

/// A `size x size` grid of `f64` values, row-major (`index = y * size + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    size: usize,
    values: Vec<f64>,
}

/// Reserve room for `cells` elements up front so an oversized request fails
/// with an error instead of aborting the process.
pub(crate) fn try_alloc<T>(cells: usize) -> Result<Vec<T>, MapGenError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(cells)
        .map_err(|source| MapGenError::Allocation { cells, source })?;
    Ok(values)
}

impl NoiseField {
    /// Create a field with every cell set to `value`.
    pub fn filled(size: usize, value: f64) -> Result<Self, MapGenError> {
        let cells = size.checked_mul(size).ok_or(MapGenError::MapTooLarge {
            size,
            max: crate::params::MAX_MAP_SIZE,
        })?;
        let mut values = try_alloc(cells)?;
        values.resize(cells, value);
        Ok(Self { size, values })
    }

    /// Build a field by evaluating `f(x, y)` for every cell, one row per task.
    pub fn from_fn<F>(size: usize, f: F) -> Result<Self, MapGenError>
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut field = Self::filled(size, 0.0)?;
        if size > 0 {
            field
                .values
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, value) in row.iter_mut().enumerate() {
                        *value = f(x, y);
                    }
                });
        }
        Ok(field)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `(x, y)`, or `None` outside the field.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.size && y < self.size {
            Some(self.values[y * self.size + x])
        } else {
            None
        }
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Apply `f` to every value.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync,
    {
        self.values.par_iter_mut().for_each(|v| *v = f(*v));
    }

    /// Combine every value with the value at the same position in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the two fields differ in size.
    pub fn zip_in_place<F>(&mut self, other: &NoiseField, f: F)
    where
        F: Fn(f64, f64) -> f64 + Sync,
    {
        assert_eq!(self.size, other.size, "field sizes must match");
        self.values
            .par_iter_mut()
            .zip(other.values.par_iter())
            .for_each(|(v, o)| *v = f(*v, *o));
    }

    /// Smallest and largest value, or `None` for an empty field.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
