//! ## Crate layout
//! - `core`: key model, filters, balancer, planner, assembler, and tracing.
//!
//! The `prelude` module carries the vocabulary a job orchestrator needs to
//! turn a key set into partitions and hand them to workers.

pub use keyshard_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{Error, partition_keyspace, resolve_dependents};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        error::{ErrorClass, ErrorOrigin},
        obs::{PartitionTraceEvent, PartitionTraceSink, RecordingSink},
        partition::PartitionFingerprint,
        prelude::*,
    };
    pub use serde::{Deserialize, Serialize};
}
