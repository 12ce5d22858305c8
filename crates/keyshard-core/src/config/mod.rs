//! Module: config
//! Responsibility: per-dimension partitioning configuration and the job-level
//! partition budget, plus their up-front validation.
//! Boundary: configuration is always passed explicitly; nothing here reads
//! process-wide state.

#[cfg(test)]
mod tests;

use crate::key::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("partition budget must be at least 1, got {num_splits}")]
    InvalidSplits { num_splits: usize },

    #[error("dimension name must not be empty")]
    EmptyName,

    #[error("dimension '{dimension}' is configured more than once")]
    DuplicateDimension { dimension: Dimension },

    #[error("dimension '{dimension}' has chunk size 0")]
    ZeroChunkSize { dimension: Dimension },

    #[error("dependent dimension '{dimension}' cannot also be splittable")]
    DependentSplittable { dimension: Dimension },

    #[error("dependent dimension '{dimension}' cannot declare overlap or chunk size")]
    DependentChunking { dimension: Dimension },

    #[error("invalid partition config document: {0}")]
    Parse(#[from] serde_json::Error),
}

///
/// DimensionConfig
///
/// How one dimension takes part in partitioning.
///
/// - splittable: may be divided into up to one chunk per element
/// - fixed (not splittable, not dependent): always a single chunk
/// - dependent: left out of the split and resolved per partition later
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    pub name: Dimension,

    #[serde(default)]
    pub can_split: bool,

    #[serde(default)]
    pub is_dependent: bool,

    #[serde(default)]
    pub overlap_before: usize,

    #[serde(default)]
    pub overlap_after: usize,

    #[serde(default)]
    pub chunk_size: Option<usize>,
}

impl DimensionConfig {
    fn new(name: impl Into<Dimension>, can_split: bool, is_dependent: bool) -> Self {
        Self {
            name: name.into(),
            can_split,
            is_dependent,
            overlap_before: 0,
            overlap_after: 0,
            chunk_size: None,
        }
    }

    pub fn splittable(name: impl Into<Dimension>) -> Self {
        Self::new(name, true, false)
    }

    pub fn fixed(name: impl Into<Dimension>) -> Self {
        Self::new(name, false, false)
    }

    pub fn dependent(name: impl Into<Dimension>) -> Self {
        Self::new(name, false, true)
    }

    #[must_use]
    pub const fn with_overlap(mut self, before: usize, after: usize) -> Self {
        self.overlap_before = before;
        self.overlap_after = after;
        self
    }

    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    #[must_use]
    pub const fn has_overlap(&self) -> bool {
        self.overlap_before > 0 || self.overlap_after > 0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.name().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.chunk_size == Some(0) {
            return Err(ConfigError::ZeroChunkSize {
                dimension: self.name.clone(),
            });
        }
        if self.is_dependent {
            if self.can_split {
                return Err(ConfigError::DependentSplittable {
                    dimension: self.name.clone(),
                });
            }
            if self.has_overlap() || self.chunk_size.is_some() {
                return Err(ConfigError::DependentChunking {
                    dimension: self.name.clone(),
                });
            }
        }

        Ok(())
    }
}

///
/// PartitionConfig
///
/// Job-level configuration: the requested partition budget and every
/// dimension that takes part, in the order partitions are enumerated.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionConfig {
    pub num_splits: usize,

    #[serde(default)]
    pub dimensions: Vec<DimensionConfig>,
}

impl PartitionConfig {
    #[must_use]
    pub const fn new(num_splits: usize) -> Self {
        Self {
            num_splits,
            dimensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dimension(mut self, dimension: DimensionConfig) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_splits == 0 {
            return Err(ConfigError::InvalidSplits {
                num_splits: self.num_splits,
            });
        }

        let mut seen = BTreeSet::new();
        for dimension in &self.dimensions {
            dimension.validate()?;
            if !seen.insert(&dimension.name) {
                return Err(ConfigError::DuplicateDimension {
                    dimension: dimension.name.clone(),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn dimension(&self, name: &Dimension) -> Option<&DimensionConfig> {
        self.dimensions.iter().find(|d| &d.name == name)
    }

    pub fn dependent_dimensions(&self) -> impl Iterator<Item = &DimensionConfig> {
        self.dimensions.iter().filter(|d| d.is_dependent)
    }
}
