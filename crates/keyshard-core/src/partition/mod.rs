//! Module: partition
//! Responsibility: the unit of work handed to one worker, and the filters that
//! recover its keys from the full key set.
//! Does not own: choosing chunks (see `assemble`) or dispatching work.

mod fingerprint;

#[cfg(test)]
mod tests;

use crate::{
    filter::{DimensionKeyFilter, ElementFilter},
    key::{Dimension, Element, Key},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

// re-exports
pub use fingerprint::PartitionFingerprint;

///
/// PartitionError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum PartitionError {
    #[error("element '{element}' does not belong to dimension '{dimension}'")]
    ElementDimensionMismatch {
        dimension: Dimension,
        element: Element,
    },

    #[error("partition already has a chunk for dimension '{dimension}'")]
    DuplicateDimension { dimension: Dimension },
}

///
/// DimensionPartition
///
/// Subset of one dimension's elements: the chunk a partition owns along an
/// independent dimension, or a resolved dependent subset.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "DimensionPartitionWire")]
pub struct DimensionPartition {
    dimension: Dimension,
    elements: Vec<Element>,
}

impl DimensionPartition {
    pub fn new(dimension: Dimension, elements: Vec<Element>) -> Result<Self, PartitionError> {
        if let Some(element) = elements.iter().find(|e| e.dimension() != &dimension) {
            return Err(PartitionError::ElementDimensionMismatch {
                dimension,
                element: element.clone(),
            });
        }

        Ok(Self {
            dimension,
            elements,
        })
    }

    // Caller guarantees every element belongs to `dimension`.
    pub(crate) const fn from_elements(dimension: Dimension, elements: Vec<Element>) -> Self {
        Self {
            dimension,
            elements,
        }
    }

    #[must_use]
    pub const fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn to_filter(&self) -> ElementFilter {
        ElementFilter::from_ids(
            self.dimension.clone(),
            self.elements.iter().map(|e| e.id().clone()),
        )
    }
}

///
/// Partition
///
/// One work unit: a chunk per constrained dimension, plus dependent-dimension
/// chunks appended by the orchestrating layer once they are resolved.
///
/// Immutable apart from `add_dependent_dimension`, which must finish before
/// the partition is handed to a worker. Deserialized partitions are rebuilt
/// through the same checks, so a worker never sees a chunk holding foreign
/// elements or two chunks for one dimension.
///
/// The filter views return the concrete `DimensionKeyFilter` so callers can
/// inspect per-dimension sub-filters; wrap with `KeyFilter::from` where the
/// tagged form is needed.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "PartitionWire")]
pub struct Partition {
    ordinal: usize,
    chunks: Vec<DimensionPartition>,
    dependents: Vec<DimensionPartition>,
}

impl Partition {
    pub(crate) const fn new(ordinal: usize, chunks: Vec<DimensionPartition>) -> Self {
        Self {
            ordinal,
            chunks,
            dependents: Vec::new(),
        }
    }

    /// Position in the assembler's output.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[must_use]
    pub fn chunks(&self) -> &[DimensionPartition] {
        &self.chunks
    }

    #[must_use]
    pub fn dependents(&self) -> &[DimensionPartition] {
        &self.dependents
    }

    /// True when the partition constrains no dimension and covers everything.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk for `dimension`, searching constrained then dependent chunks.
    #[must_use]
    pub fn get_chunk(&self, dimension: &Dimension) -> Option<&DimensionPartition> {
        self.chunks
            .iter()
            .chain(&self.dependents)
            .find(|chunk| chunk.dimension() == dimension)
    }

    /// Keys pass unless a constrained dimension holds an element outside
    /// this partition's chunk.
    #[must_use]
    pub fn independent_filter(&self) -> DimensionKeyFilter {
        DimensionKeyFilter::from_filters(
            self.chunks.iter().map(DimensionPartition::to_filter),
            true,
            true,
        )
    }

    /// Like `filter`, but a key carrying any dimension that is neither
    /// constrained nor resolved as dependent is rejected.
    #[must_use]
    pub fn extra_dimensions_filter(&self) -> DimensionKeyFilter {
        self.compose(false)
    }

    /// Independent chunks plus every resolved dependent chunk.
    #[must_use]
    pub fn filter(&self) -> DimensionKeyFilter {
        self.compose(true)
    }

    fn compose(&self, extra_allowed: bool) -> DimensionKeyFilter {
        DimensionKeyFilter::from_filters(
            self.chunks
                .iter()
                .chain(&self.dependents)
                .map(DimensionPartition::to_filter),
            extra_allowed,
            true,
        )
    }

    /// Append a resolved dependent chunk.
    pub fn add_dependent_dimension(
        &mut self,
        dependent: DimensionPartition,
    ) -> Result<(), PartitionError> {
        if self.get_chunk(dependent.dimension()).is_some() {
            return Err(PartitionError::DuplicateDimension {
                dimension: dependent.dimension().clone(),
            });
        }
        self.dependents.push(dependent);

        Ok(())
    }

    /// Elements of `dimension` that co-occur with keys this partition selects
    /// independently, in first-seen order.
    pub fn discover_dependent<'a>(
        &self,
        dimension: &Dimension,
        keys: impl IntoIterator<Item = &'a Key>,
    ) -> DimensionPartition {
        let filter = self.independent_filter();
        let mut seen = BTreeSet::new();
        let mut elements = Vec::new();

        for key in keys {
            if !filter.matches(key) {
                continue;
            }
            if let Some(element) = key.get(dimension)
                && seen.insert(element.id())
            {
                elements.push(element.clone());
            }
        }

        DimensionPartition::from_elements(dimension.clone(), elements)
    }

    /// Keys belonging to this partition, honoring resolved dependent chunks.
    pub fn slice<'a>(&self, keys: impl IntoIterator<Item = &'a Key>) -> Vec<&'a Key> {
        let filter = self.filter();

        keys.into_iter().filter(|key| filter.matches(key)).collect()
    }

    /// Expected elements of `dimension` that are absent from `found`.
    #[must_use]
    pub fn missing_elements(&self, dimension: &Dimension, found: &[Element]) -> Vec<Element> {
        self.get_chunk(dimension).map_or_else(Vec::new, |chunk| {
            chunk
                .elements()
                .iter()
                .filter(|element| !found.contains(element))
                .cloned()
                .collect()
        })
    }
}

///
/// DimensionPartitionWire
///

#[derive(Deserialize)]
struct DimensionPartitionWire {
    dimension: Dimension,
    elements: Vec<Element>,
}

impl TryFrom<DimensionPartitionWire> for DimensionPartition {
    type Error = PartitionError;

    fn try_from(wire: DimensionPartitionWire) -> Result<Self, Self::Error> {
        Self::new(wire.dimension, wire.elements)
    }
}

///
/// PartitionWire
///

#[derive(Deserialize)]
struct PartitionWire {
    ordinal: usize,
    chunks: Vec<DimensionPartition>,
    #[serde(default)]
    dependents: Vec<DimensionPartition>,
}

impl TryFrom<PartitionWire> for Partition {
    type Error = PartitionError;

    fn try_from(wire: PartitionWire) -> Result<Self, Self::Error> {
        let mut seen = BTreeSet::new();
        for chunk in &wire.chunks {
            if !seen.insert(chunk.dimension()) {
                return Err(PartitionError::DuplicateDimension {
                    dimension: chunk.dimension().clone(),
                });
            }
        }

        let mut partition = Self::new(wire.ordinal, wire.chunks);
        for dependent in wire.dependents {
            partition.add_dependent_dimension(dependent)?;
        }

        Ok(partition)
    }
}
