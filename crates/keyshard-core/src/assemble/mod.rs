//! Module: assemble
//! Responsibility: cut each constrained dimension's ordered element list into
//! chunks (by count or by chunk size, with optional overlap) and enumerate
//! the cross product of those chunks as partitions.
//! Does not own: choosing counts (see `plan`) or resolving dependent
//! dimensions (see `Partition::discover_dependent`).

mod chunk;


use crate::{
    config::PartitionConfig,
    key::{Dimension, Element, Keyspace},
    obs::{self, PartitionTraceEvent, PartitionTraceSink},
    partition::{DimensionPartition, Partition},
    plan::SplitPlan,
};
use thiserror::Error as ThisError;

///
/// AssembleError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum AssembleError {
    #[error("planned dimension '{dimension}' does not occur in the keyspace")]
    MissingDimension { dimension: Dimension },

    #[error("dimension '{dimension}' requests overlap or chunk size but is not constrained")]
    UnconstrainedChunking { dimension: Dimension },

    #[error("dimension '{dimension}' has chunk size 0")]
    ZeroChunkSize { dimension: Dimension },

    #[error("dimension '{dimension}' produced no chunks")]
    EmptyDimension { dimension: Dimension },

    #[error("partition count overflows: {partitions} chunk combinations")]
    TooManyPartitions { partitions: String },
}

impl AssembleError {
    #[must_use]
    pub const fn is_invariant(&self) -> bool {
        matches!(self, Self::TooManyPartitions { .. })
    }
}

///
/// KeyspaceAssembler
///
/// Produces the ordered partition list for a split plan. Partitions are
/// enumerated with the first planned dimension varying slowest. With no
/// constrained dimension the result is exactly one root partition.
///

pub struct KeyspaceAssembler<'a> {
    keyspace: &'a Keyspace,
    config: &'a PartitionConfig,
}

impl<'a> KeyspaceAssembler<'a> {
    #[must_use]
    pub const fn new(keyspace: &'a Keyspace, config: &'a PartitionConfig) -> Self {
        Self { keyspace, config }
    }

    pub fn assemble(
        &self,
        plan: &SplitPlan,
        sink: Option<&dyn PartitionTraceSink>,
    ) -> Result<Vec<Partition>, AssembleError> {
        self.check_chunking(plan)?;

        let mut axes = Vec::with_capacity(plan.len());
        for entry in plan {
            let chunks = self.chunk_dimension(&entry.dimension, entry.count)?;
            obs::emit(
                sink,
                PartitionTraceEvent::DimensionSplit {
                    dimension: entry.dimension.to_string(),
                    count: entry.count,
                    chunks: chunks.len(),
                },
            );
            axes.push(chunks);
        }

        let partitions = cross_product(&axes)?;
        obs::emit(
            sink,
            PartitionTraceEvent::Assembled {
                partitions: partitions.len(),
            },
        );

        Ok(partitions)
    }

    // Overlap and chunk size only make sense on planned (constrained) dimensions.
    fn check_chunking(&self, plan: &SplitPlan) -> Result<(), AssembleError> {
        for dimension in &self.config.dimensions {
            let chunked = dimension.has_overlap() || dimension.chunk_size.is_some();
            if chunked && plan.count(&dimension.name).is_none() {
                return Err(AssembleError::UnconstrainedChunking {
                    dimension: dimension.name.clone(),
                });
            }
        }

        Ok(())
    }

    fn chunk_dimension(
        &self,
        dimension: &Dimension,
        count: usize,
    ) -> Result<Vec<DimensionPartition>, AssembleError> {
        let observed =
            self.keyspace
                .dimension(dimension)
                .ok_or_else(|| AssembleError::MissingDimension {
                    dimension: dimension.clone(),
                })?;
        let elements = observed.elements();
        let settings = self.config.dimension(dimension);

        let runs: Vec<Vec<Element>> = match settings.and_then(|s| s.chunk_size) {
            Some(0) => {
                return Err(AssembleError::ZeroChunkSize {
                    dimension: dimension.clone(),
                });
            }
            Some(size) => chunk::sized(elements, size),
            None if count > 1 => chunk::balanced(elements, count),
            None => vec![elements.to_vec()],
        };
        let runs = match settings {
            Some(s) if s.has_overlap() => {
                chunk::with_overlap(&runs, s.overlap_before, s.overlap_after)
            }
            _ => runs,
        };

        if runs.is_empty() || runs.iter().any(Vec::is_empty) {
            return Err(AssembleError::EmptyDimension {
                dimension: dimension.clone(),
            });
        }

        Ok(runs
            .into_iter()
            .map(|run| DimensionPartition::from_elements(dimension.clone(), run))
            .collect())
    }
}

// Ordered cross product, last axis varying fastest.
fn cross_product(axes: &[Vec<DimensionPartition>]) -> Result<Vec<Partition>, AssembleError> {
    let total = axes
        .iter()
        .try_fold(1usize, |acc, axis| acc.checked_mul(axis.len()))
        .ok_or_else(|| AssembleError::TooManyPartitions {
            partitions: axes
                .iter()
                .map(|axis| axis.len().to_string())
                .collect::<Vec<_>>()
                .join(" x "),
        })?;

    let mut partitions = Vec::with_capacity(total);
    let mut cursor = vec![0usize; axes.len()];

    for ordinal in 0..total {
        let chunks = axes
            .iter()
            .zip(&cursor)
            .map(|(axis, at)| axis[*at].clone())
            .collect();
        partitions.push(Partition::new(ordinal, chunks));

        for (slot, axis) in axes.iter().enumerate().rev() {
            cursor[slot] += 1;
            if cursor[slot] < axis.len() {
                break;
            }
            cursor[slot] = 0;
        }
    }

    Ok(partitions)
}
