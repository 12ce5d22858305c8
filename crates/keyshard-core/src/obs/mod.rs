//! Partitioning trace boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect results.
//! There is no process-wide sink; every entry point takes an
//! `Option<&dyn PartitionTraceSink>`.

use crate::error::{ErrorClass, ErrorOrigin};
use std::cell::RefCell;

///
/// PartitionTraceSink
///

pub trait PartitionTraceSink {
    fn on_event(&self, event: PartitionTraceEvent);
}

///
/// PartitionTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartitionTraceEvent {
    BalanceStart {
        min: usize,
        max: usize,
        dimensions: usize,
    },
    BalanceIteration {
        iteration: usize,
        fixed: usize,
        free: usize,
        sub_min: usize,
        sub_max: usize,
    },
    BalanceSolved {
        product: usize,
        iterations: usize,
    },
    DimensionSplit {
        dimension: String,
        count: usize,
        chunks: usize,
    },
    Assembled {
        partitions: usize,
    },
    Error {
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

pub(crate) fn emit(sink: Option<&dyn PartitionTraceSink>, event: PartitionTraceEvent) {
    if let Some(sink) = sink {
        sink.on_event(event);
    }
}

///
/// RecordingSink
///
/// Keeps every event in arrival order. Single-threaded by construction.
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<PartitionTraceEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<PartitionTraceEvent> {
        self.events.borrow().clone()
    }

    /// Drain and return the recorded events.
    pub fn take(&self) -> Vec<PartitionTraceEvent> {
        self.events.take()
    }
}

impl PartitionTraceSink for RecordingSink {
    fn on_event(&self, event: PartitionTraceEvent) {
        self.events.borrow_mut().push(event);
    }
}
