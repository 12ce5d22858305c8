//! Core engine for keyshard: the key/dimension model, key filters, the
//! dimension-count balancer, split planning, and partition assembly.
//! Domain vocabulary is exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod assemble;
pub mod balance;
pub mod config;
pub mod error;
pub mod filter;
pub mod key;
pub mod obs;
pub mod partition;
pub mod plan;

mod pipeline;

pub use error::Error;
pub use pipeline::{partition_keyspace, resolve_dependents};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, solvers, or trace sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{DimensionConfig, PartitionConfig},
        filter::{DimensionKeyFilter, ElementFilter, ExactKeyFilter, KeyFilter},
        key::{Dimension, Element, ElementId, Key, Keyspace},
        partition::{DimensionPartition, Partition},
    };
}
