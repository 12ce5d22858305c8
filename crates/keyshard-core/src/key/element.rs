use crate::key::{Dimension, KeyError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// ElementId
///
/// Identifier of one discrete value along a dimension.
/// Integer identifiers order numerically and sort before text identifiers.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ElementId {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Text(String),
}

impl From<i64> for ElementId {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ElementId {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for ElementId {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ElementId {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

///
/// Element
///
/// One (dimension, identifier) pair.
///
/// The derived ordering (dimension, then identifier) exists so elements can
/// live in ordered collections; use [`Element::try_cmp`] when comparing
/// values that are expected to share a dimension.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[display("{dimension}={id}")]
pub struct Element {
    dimension: Dimension,
    id: ElementId,
}

impl Element {
    pub fn new(dimension: impl Into<Dimension>, id: impl Into<ElementId>) -> Self {
        Self {
            dimension: dimension.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    #[must_use]
    pub const fn id(&self) -> &ElementId {
        &self.id
    }

    /// Compare two elements of the same dimension by identifier.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, KeyError> {
        if self.dimension != other.dimension {
            return Err(KeyError::DimensionMismatch {
                left: self.dimension.clone(),
                right: other.dimension.clone(),
            });
        }

        Ok(self.id.cmp(&other.id))
    }
}
