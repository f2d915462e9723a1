//! Row-major output matrices for ingested vectors
//!
//! [`VectorMatrix`] owns a contiguous `capacity x dimension` block of `f32`.
//! [`VectorMatrixMut`] is the non-owning, mutable view the ingestion pipeline
//! writes through. The view never grows and never reads or writes past row
//! `capacity - 1`.

use crate::config::IngestConfig;
use crate::error::{Error, Result};

/// Number of floats in a `capacity x dimension` block, checked for overflow
fn element_count(capacity: usize, dimension: usize) -> Result<usize> {
    if dimension == 0 {
        return Err(Error::LayoutError("dimension must be non-zero".into()));
    }
    capacity.checked_mul(dimension).ok_or_else(|| {
        Error::LayoutError(format!(
            "matrix of {capacity} x {dimension} floats overflows usize"
        ))
    })
}

/// Owned, preallocated output buffer
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
    data: Vec<f32>,
    dimension: usize,
}

impl VectorMatrix {
    /// Allocate a zero-filled matrix with `capacity` rows of `dimension` floats
    pub fn zeroed(capacity: usize, dimension: usize) -> Result<Self> {
        Self::filled(capacity, dimension, 0.0)
    }

    /// Allocate a matrix with every element set to `value`
    pub fn filled(capacity: usize, dimension: usize, value: f32) -> Result<Self> {
        let len = element_count(capacity, dimension)?;
        Ok(Self {
            data: vec![value; len],
            dimension,
        })
    }

    /// Wrap existing row-major storage
    pub fn from_vec(data: Vec<f32>, dimension: usize) -> Result<Self> {
        if dimension == 0 || data.len() % dimension != 0 {
            return Err(Error::LayoutError(format!(
                "{} floats do not split into rows of {}",
                data.len(),
                dimension
            )));
        }
        Ok(Self { data, dimension })
    }

    /// Maximum number of rows
    pub fn capacity(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Floats per row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Borrow row `index`, if it exists
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.data.get(start..end)
    }

    /// Iterate over the first `count` rows (clamped to the capacity)
    pub fn rows(&self, count: usize) -> impl Iterator<Item = &[f32]> + '_ {
        self.data
            .chunks_exact(self.dimension)
            .take(count.min(self.capacity()))
    }

    /// The whole buffer in row-major order
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable view for an ingestion run
    pub fn view_mut(&mut self) -> VectorMatrixMut<'_> {
        VectorMatrixMut {
            data: &mut self.data,
            dimension: self.dimension,
        }
    }

    /// Keep only the first `count` rows, like slicing `vectors[:count]`
    pub fn truncate(&mut self, count: usize) {
        self.data.truncate(count.saturating_mul(self.dimension));
    }

    /// Consume the matrix and return its row-major storage
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Mutable, non-owning `capacity x dimension` view over caller storage
#[derive(Debug)]
pub struct VectorMatrixMut<'a> {
    data: &'a mut [f32],
    dimension: usize,
}

impl<'a> VectorMatrixMut<'a> {
    /// View `data` as rows of `dimension` floats
    pub fn new(data: &'a mut [f32], dimension: usize) -> Result<Self> {
        if dimension == 0 || data.len() % dimension != 0 {
            return Err(Error::LayoutError(format!(
                "{} floats do not split into rows of {}",
                data.len(),
                dimension
            )));
        }
        Ok(Self { data, dimension })
    }

    /// View `data` with the exact shape `config` declares
    pub fn with_config(data: &'a mut [f32], config: &IngestConfig) -> Result<Self> {
        config.validate()?;
        let expected = element_count(config.capacity, config.dimension)?;
        if data.len() != expected {
            return Err(Error::LayoutError(format!(
                "buffer holds {} floats, expected {} x {}",
                data.len(),
                config.capacity,
                config.dimension
            )));
        }
        Self::new(data, config.dimension)
    }

    /// View a standard-layout 2-D array, rows as vectors
    #[cfg(feature = "ndarray")]
    pub fn from_array(array: ndarray::ArrayViewMut2<'a, f32>) -> Result<Self> {
        let (_, columns) = array.dim();
        let data = array.into_slice().ok_or_else(|| {
            Error::LayoutError("array is not contiguous in standard order".into())
        })?;
        Self::new(data, columns)
    }

    /// Maximum number of rows
    pub fn capacity(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Floats per row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Borrow row `index`, if it exists
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.data.get(start..end)
    }

    /// Mutably borrow row `index`
    pub fn row_mut(&mut self, index: usize) -> Result<&mut [f32]> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(Error::RowOutOfBounds { index, capacity });
        }
        let start = index * self.dimension;
        Ok(&mut self.data[start..start + self.dimension])
    }
}
