//! Ingestion configuration

use serde::{Deserialize, Serialize};

use crate::convert::F32_SIZE;
use crate::error::{Error, Result};
use crate::matrix::VectorMatrix;

/// Default number of floats per vector
pub const DEFAULT_DIMENSION: usize = 512;

/// Default maximum number of vectors per output buffer
pub const DEFAULT_CAPACITY: usize = 50_000;

/// Shape of the output buffer an ingestion run writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Number of floats per vector (`D`)
    pub dimension: usize,

    /// Maximum number of vectors the output buffer holds (`C`)
    pub capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl IngestConfig {
    /// Create a configuration with the given dimension and capacity
    pub fn new(dimension: usize, capacity: usize) -> Self {
        Self {
            dimension,
            capacity,
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a usable buffer
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(Error::InvalidConfig("dimension must be non-zero".into()));
        }
        let total_bytes = self
            .row_bytes()
            .and_then(|row| row.checked_mul(self.capacity));
        if total_bytes.is_none() {
            return Err(Error::InvalidConfig(format!(
                "buffer of {} x {} floats overflows usize",
                self.capacity, self.dimension
            )));
        }
        Ok(())
    }

    /// Byte length a record must have to decode into one vector, or `None`
    /// if it overflows `usize`
    pub fn row_bytes(&self) -> Option<usize> {
        self.dimension.checked_mul(F32_SIZE)
    }

    /// Allocate a zeroed output buffer of this shape
    pub fn allocate(&self) -> Result<VectorMatrix> {
        self.validate()?;
        VectorMatrix::zeroed(self.capacity, self.dimension)
    }
}
