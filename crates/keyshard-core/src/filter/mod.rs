//! Module: filter
//! Responsibility: predicates over elements and keys used to slice a dataset
//! into the keys owned by one partition.
//! Does not own: deciding chunk membership (see `assemble`).

mod dimension;
mod element;
mod exact;


use crate::key::{Dimension, Key};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

// re-exports
pub use dimension::DimensionKeyFilter;
pub use element::ElementFilter;
pub use exact::ExactKeyFilter;

///
/// FilterError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("element of dimension '{found}' used with a filter over dimension '{expected}'")]
    DimensionMismatch {
        expected: Dimension,
        found: Dimension,
    },

    #[error("a filter for dimension '{dimension}' is already registered")]
    DuplicateDimension { dimension: Dimension },
}

///
/// KeyFilter
///
/// Predicate over whole keys.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum KeyFilter {
    Exact(ExactKeyFilter),
    Dimension(DimensionKeyFilter),
}

impl KeyFilter {
    #[must_use]
    pub fn matches(&self, key: &Key) -> bool {
        match self {
            Self::Exact(filter) => filter.matches(key),
            Self::Dimension(filter) => filter.matches(key),
        }
    }
}

impl From<ExactKeyFilter> for KeyFilter {
    fn from(filter: ExactKeyFilter) -> Self {
        Self::Exact(filter)
    }
}

impl From<DimensionKeyFilter> for KeyFilter {
    fn from(filter: DimensionKeyFilter) -> Self {
        Self::Dimension(filter)
    }
}

///
/// narrows
///
/// True iff every dimension of `a` is a dimension of `b` and both keys
/// agree on its element. Every key narrows into itself, and the root key
/// narrows into every key.
///

#[must_use]
pub fn narrows(a: &Key, b: &Key) -> bool {
    a.len() <= b.len()
        && a
            .elements()
            .all(|element| b.get(element.dimension()) == Some(element))
}
