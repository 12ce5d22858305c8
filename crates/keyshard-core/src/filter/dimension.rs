use crate::{
    filter::{ElementFilter, FilterError},
    key::{Dimension, Key},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// DimensionKeyFilter
///
/// Key predicate composed of at most one `ElementFilter` per dimension.
///
/// A key matches when, for every registered dimension, its element passes
/// the sub-filter (or, when the key lacks that dimension, `missing_allowed`
/// holds), and, when the key carries a dimension without a sub-filter,
/// `extra_allowed` holds.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "DimensionKeyFilterWire")]
pub struct DimensionKeyFilter {
    filters: BTreeMap<Dimension, ElementFilter>,
    extra_allowed: bool,
    missing_allowed: bool,
}

impl DimensionKeyFilter {
    #[must_use]
    pub const fn new(extra_allowed: bool, missing_allowed: bool) -> Self {
        Self {
            filters: BTreeMap::new(),
            extra_allowed,
            missing_allowed,
        }
    }

    // Caller guarantees one filter per dimension.
    pub(crate) fn from_filters(
        filters: impl IntoIterator<Item = ElementFilter>,
        extra_allowed: bool,
        missing_allowed: bool,
    ) -> Self {
        let filters = filters
            .into_iter()
            .map(|filter| (filter.dimension().clone(), filter))
            .collect::<BTreeMap<_, _>>();

        Self {
            filters,
            extra_allowed,
            missing_allowed,
        }
    }

    pub fn add(&mut self, filter: ElementFilter) -> Result<(), FilterError> {
        if self.filters.contains_key(filter.dimension()) {
            return Err(FilterError::DuplicateDimension {
                dimension: filter.dimension().clone(),
            });
        }
        self.filters.insert(filter.dimension().clone(), filter);

        Ok(())
    }

    #[must_use]
    pub fn matches(&self, key: &Key) -> bool {
        let constrained = self
            .filters
            .iter()
            .all(|(dimension, filter)| match key.get(dimension) {
                Some(element) => filter.contains_id(element.id()),
                None => self.missing_allowed,
            });
        if !constrained {
            return false;
        }

        self.extra_allowed
            || key
                .dimensions()
                .all(|dimension| self.filters.contains_key(dimension))
    }

    #[must_use]
    pub fn get(&self, dimension: &Dimension) -> Option<&ElementFilter> {
        self.filters.get(dimension)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.filters.keys()
    }

    #[must_use]
    pub const fn extra_allowed(&self) -> bool {
        self.extra_allowed
    }

    #[must_use]
    pub const fn missing_allowed(&self) -> bool {
        self.missing_allowed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

///
/// DimensionKeyFilterWire
///

#[derive(Deserialize)]
struct DimensionKeyFilterWire {
    filters: BTreeMap<Dimension, ElementFilter>,
    extra_allowed: bool,
    missing_allowed: bool,
}

impl TryFrom<DimensionKeyFilterWire> for DimensionKeyFilter {
    type Error = FilterError;

    // each map key must name the dimension of the filter it holds
    fn try_from(wire: DimensionKeyFilterWire) -> Result<Self, Self::Error> {
        let mut filter = Self::new(wire.extra_allowed, wire.missing_allowed);
        for (dimension, sub) in wire.filters {
            if &dimension != sub.dimension() {
                return Err(FilterError::DimensionMismatch {
                    expected: dimension,
                    found: sub.dimension().clone(),
                });
            }
            filter.add(sub)?;
        }

        Ok(filter)
    }
}
