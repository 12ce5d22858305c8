//! Module: plan
//! Responsibility: turn dimension configuration plus observed element counts
//! into balancer input, and return how many chunks each independent
//! dimension is cut into.
//! Does not own: slicing element lists (see `assemble`).


use crate::{
    balance::{BalanceError, Balancer},
    config::PartitionConfig,
    key::{Dimension, Keyspace},
    obs::PartitionTraceSink,
};
use thiserror::Error as ThisError;

///
/// PlanError
///

#[derive(Debug, ThisError)]
pub enum PlanError {
    #[error("partition budget must be at least 1, got {num_splits}")]
    InvalidSplits { num_splits: usize },

    #[error("configured dimension '{dimension}' does not occur in the keyspace")]
    MissingDimension { dimension: Dimension },

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

///
/// DimensionCount
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DimensionCount {
    pub dimension: Dimension,
    pub count: usize,
}

///
/// SplitPlan
///
/// Chunk count per independent dimension, in configuration order.
/// Dependent dimensions never appear here.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitPlan {
    counts: Vec<DimensionCount>,
}

impl SplitPlan {
    #[must_use]
    pub const fn new(counts: Vec<DimensionCount>) -> Self {
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, dimension: &Dimension) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| &entry.dimension == dimension)
            .map(|entry| entry.count)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DimensionCount> {
        self.counts.iter()
    }

    /// Product of all counts: the number of partitions before chunk-size
    /// overrides are applied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .fold(1, |acc, entry| acc.saturating_mul(entry.count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> IntoIterator for &'a SplitPlan {
    type Item = &'a DimensionCount;
    type IntoIter = std::slice::Iter<'a, DimensionCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

///
/// DimensionSplitPlanner
///
/// Builds a balancer with budget `[1, num_splits]`:
/// - splittable dimensions: `size = |elements|`, counts in `[1, size]`
/// - other independent dimensions: fixed at 1
/// - dependent dimensions: not added
///

pub struct DimensionSplitPlanner<'a> {
    keyspace: &'a Keyspace,
    config: &'a PartitionConfig,
}

impl<'a> DimensionSplitPlanner<'a> {
    #[must_use]
    pub const fn new(keyspace: &'a Keyspace, config: &'a PartitionConfig) -> Self {
        Self { keyspace, config }
    }

    pub fn plan(&self, sink: Option<&dyn PartitionTraceSink>) -> Result<SplitPlan, PlanError> {
        let num_splits = self.config.num_splits;
        if num_splits == 0 {
            return Err(PlanError::InvalidSplits { num_splits });
        }

        let mut balancer = Balancer::new(1, num_splits)?;
        for dimension in &self.config.dimensions {
            let observed = self.keyspace.dimension(&dimension.name).ok_or_else(|| {
                PlanError::MissingDimension {
                    dimension: dimension.name.clone(),
                }
            })?;
            if dimension.is_dependent {
                continue;
            }

            let size = observed.len();
            let max_count = if dimension.can_split { size } else { 1 };
            balancer.add_dimension(dimension.name.clone(), size, 1, Some(max_count))?;
        }

        let balance = balancer.compute(sink)?;
        let counts = balance
            .into_counts()
            .into_iter()
            .map(|(dimension, count)| DimensionCount { dimension, count })
            .collect();

        Ok(SplitPlan::new(counts))
    }
}
