//! Module: balance
//! Responsibility: choose one partition count per abstract dimension so the
//! product of all counts lands inside a global `[min, max]` budget while
//! approximating a geometric (balanced) split.
//! Does not own: keyspace lookups or dimension configuration (see `plan`).

mod spread;


use crate::obs::{self, PartitionTraceEvent, PartitionTraceSink};
use std::fmt;
use thiserror::Error as ThisError;

///
/// BalanceError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum BalanceError {
    #[error("invalid partition budget [{min}, {max}]: requires 1 <= min <= max")]
    InvalidBudget { min: usize, max: usize },

    #[error("dimension '{dimension}' has size 0")]
    EmptyDimension { dimension: String },

    #[error("dimension '{dimension}' min count {min_count} is outside [1, {size}]")]
    InvalidMinCount {
        dimension: String,
        min_count: usize,
        size: usize,
    },

    #[error("dimension '{dimension}' max count {max_count} is below min count {min_count}")]
    InvalidMaxCount {
        dimension: String,
        min_count: usize,
        max_count: usize,
    },

    #[error("no partition counts satisfy budget [{min}, {max}]: product {product}")]
    Infeasible {
        min: usize,
        max: usize,
        product: usize,
    },
}

impl BalanceError {
    #[must_use]
    pub const fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }
}

///
/// BalanceDimension
///
/// One abstract dimension as seen by the balancer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceDimension<K> {
    pub key: K,
    pub size: usize,
    pub min_count: usize,
    pub max_count: Option<usize>,
}

impl<K> BalanceDimension<K> {
    const fn is_fixed(&self) -> bool {
        matches!(self.max_count, Some(max) if max == self.min_count)
    }

    // Bound a proposed count must be clamped to, if it violates one.
    fn clamp(&self, count: usize) -> Option<usize> {
        let ceiling = self.max_count.map_or(self.size, |max| max.min(self.size));
        if count < self.min_count {
            Some(self.min_count)
        } else if count > ceiling {
            Some(ceiling)
        } else {
            None
        }
    }
}

///
/// Balance
///
/// Solved counts, in the order dimensions were added.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Balance<K> {
    counts: Vec<(K, usize)>,
    product: usize,
    iterations: usize,
}

impl<K: PartialEq> Balance<K> {
    #[must_use]
    pub fn count(&self, key: &K) -> Option<usize> {
        self.counts
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, count)| *count)
    }

    #[must_use]
    pub fn counts(&self) -> &[(K, usize)] {
        &self.counts
    }

    #[must_use]
    pub fn into_counts(self) -> Vec<(K, usize)> {
        self.counts
    }

    #[must_use]
    pub const fn product(&self) -> usize {
        self.product
    }

    /// Number of fix-and-resolve rounds the solver took.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
}

///
/// Balancer
///
/// Generic dimension-count solver.
///
/// Dimensions are either *fixed* (their count is decided) or *free*. Each
/// round derives a sub-budget for the free dimensions from the product of
/// the fixed ones, spreads it geometrically, then clamps any count that
/// breaks a per-dimension bound and marks it fixed. Rounds repeat until no
/// clamp happens; every round that continues fixes at least one more
/// dimension, so the loop runs at most `dimensions + 1` times. The budget is
/// only checked against the final product.
///

#[derive(Clone, Debug)]
pub struct Balancer<K> {
    min: usize,
    max: usize,
    dimensions: Vec<BalanceDimension<K>>,
}

impl<K: Clone + fmt::Display> Balancer<K> {
    pub fn new(min: usize, max: usize) -> Result<Self, BalanceError> {
        if min < 1 || max < min {
            return Err(BalanceError::InvalidBudget { min, max });
        }

        Ok(Self {
            min,
            max,
            dimensions: Vec::new(),
        })
    }

    /// Register one dimension. `max_count == Some(min_count)` fixes it.
    pub fn add_dimension(
        &mut self,
        key: K,
        size: usize,
        min_count: usize,
        max_count: Option<usize>,
    ) -> Result<(), BalanceError> {
        if size == 0 {
            return Err(BalanceError::EmptyDimension {
                dimension: key.to_string(),
            });
        }
        if min_count < 1 || min_count > size {
            return Err(BalanceError::InvalidMinCount {
                dimension: key.to_string(),
                min_count,
                size,
            });
        }
        if let Some(max_count) = max_count
            && max_count < min_count
        {
            return Err(BalanceError::InvalidMaxCount {
                dimension: key.to_string(),
                min_count,
                max_count,
            });
        }

        self.dimensions.push(BalanceDimension {
            key,
            size,
            min_count,
            max_count,
        });

        Ok(())
    }

    #[must_use]
    pub fn dimensions(&self) -> &[BalanceDimension<K>] {
        &self.dimensions
    }

    #[must_use]
    pub const fn budget(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    pub fn compute(
        &self,
        sink: Option<&dyn PartitionTraceSink>,
    ) -> Result<Balance<K>, BalanceError> {
        obs::emit(
            sink,
            PartitionTraceEvent::BalanceStart {
                min: self.min,
                max: self.max,
                dimensions: self.dimensions.len(),
            },
        );

        let mut counts: Vec<usize> = self.dimensions.iter().map(|d| d.min_count).collect();
        let mut fixed: Vec<bool> = self
            .dimensions
            .iter()
            .map(BalanceDimension::is_fixed)
            .collect();
        let mut iterations = 0;

        loop {
            iterations += 1;
            debug_assert!(iterations <= self.dimensions.len() + 1);

            let fixed_product = product(
                counts
                    .iter()
                    .zip(&fixed)
                    .filter(|(_, is_fixed)| **is_fixed)
                    .map(|(count, _)| *count),
            );
            let sub_min = self.min.div_ceil(fixed_product);
            let sub_max = self.max / fixed_product;
            let free: Vec<usize> = (0..self.dimensions.len()).filter(|i| !fixed[*i]).collect();

            obs::emit(
                sink,
                PartitionTraceEvent::BalanceIteration {
                    iteration: iterations,
                    fixed: self.dimensions.len() - free.len(),
                    free: free.len(),
                    sub_min,
                    sub_max,
                },
            );

            if sub_min > sub_max {
                return Err(self.infeasible(fixed_product));
            }
            if free.is_empty() {
                break;
            }

            let mut clamped = false;
            for (slot, count) in spread::geometric(&self.dimensions, &free, sub_max) {
                match self.dimensions[slot].clamp(count) {
                    Some(bound) => {
                        counts[slot] = bound;
                        fixed[slot] = true;
                        clamped = true;
                    }
                    None => counts[slot] = count,
                }
            }
            if !clamped {
                break;
            }
        }

        let total = product(counts.iter().copied());
        if total < self.min || total > self.max {
            return Err(self.infeasible(total));
        }

        obs::emit(
            sink,
            PartitionTraceEvent::BalanceSolved {
                product: total,
                iterations,
            },
        );

        Ok(Balance {
            counts: self
                .dimensions
                .iter()
                .zip(counts)
                .map(|(dimension, count)| (dimension.key.clone(), count))
                .collect(),
            product: total,
            iterations,
        })
    }

    const fn infeasible(&self, product: usize) -> BalanceError {
        BalanceError::Infeasible {
            min: self.min,
            max: self.max,
            product,
        }
    }
}

// Saturates so an oversized product reads as "above any budget".
fn product(counts: impl Iterator<Item = usize>) -> usize {
    counts.fold(1, usize::saturating_mul)
}
