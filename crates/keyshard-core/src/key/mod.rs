//! Module: key
//! Responsibility: the addressing vocabulary (dimensions, elements, keys) and
//! the per-dimension aggregate view of every key observed in a job.
//! Does not own: filtering or partitioning decisions.

mod dimension;
mod element;
mod key;
mod keyspace;

#[cfg(test)]
mod tests;

use thiserror::Error as ThisError;

// re-exports
pub use dimension::Dimension;
pub use element::{Element, ElementId};
pub use key::Key;
pub use keyspace::{Keyspace, KeyspaceDimension};

///
/// KeyError
///
/// Violations of the key model invariants.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum KeyError {
    #[error("key has more than one element for dimension '{dimension}'")]
    DuplicateDimension { dimension: Dimension },

    #[error("cannot compare elements of dimension '{left}' and dimension '{right}'")]
    DimensionMismatch { left: Dimension, right: Dimension },
}
