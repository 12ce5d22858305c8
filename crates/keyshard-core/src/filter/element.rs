use crate::{
    filter::FilterError,
    key::{Dimension, Element, ElementId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// ElementFilter
///
/// Allowed elements of a single dimension.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ElementFilter {
    dimension: Dimension,
    allowed: BTreeSet<ElementId>,
}

impl ElementFilter {
    #[must_use]
    pub const fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            allowed: BTreeSet::new(),
        }
    }

    pub fn try_from_elements<'a>(
        dimension: Dimension,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> Result<Self, FilterError> {
        let mut filter = Self::new(dimension);
        for element in elements {
            filter.insert(element)?;
        }

        Ok(filter)
    }

    // Caller guarantees the identifiers belong to `dimension`.
    pub(crate) fn from_ids(dimension: Dimension, ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            dimension,
            allowed: ids.into_iter().collect(),
        }
    }

    /// Allow `element`; returns `false` if it was already allowed.
    pub fn insert(&mut self, element: &Element) -> Result<bool, FilterError> {
        self.check_dimension(element)?;

        Ok(self.allowed.insert(element.id().clone()))
    }

    pub fn matches(&self, element: &Element) -> Result<bool, FilterError> {
        self.check_dimension(element)?;

        Ok(self.allowed.contains(element.id()))
    }

    pub(crate) fn contains_id(&self, id: &ElementId) -> bool {
        self.allowed.contains(id)
    }

    #[must_use]
    pub const fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    fn check_dimension(&self, element: &Element) -> Result<(), FilterError> {
        if element.dimension() != &self.dimension {
            return Err(FilterError::DimensionMismatch {
                expected: self.dimension.clone(),
                found: element.dimension().clone(),
            });
        }

        Ok(())
    }
}
