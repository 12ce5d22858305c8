use crate::{
    assemble::AssembleError, balance::BalanceError, config::ConfigError, filter::FilterError,
    key::KeyError, partition::PartitionError, plan::PlanError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured partitioning error with a stable classification.
/// Every module error converts into this type at the crate boundary; the
/// originating module error is kept in `detail`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Originating module error, when there is one.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub const fn is_infeasible(&self) -> bool {
        matches!(self.class, ErrorClass::Infeasible)
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.class, ErrorClass::Configuration)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Module error carried by [`Error`].
/// The variant always corresponds to `origin`.
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Key(KeyError),
    #[error("{0}")]
    Filter(FilterError),
    #[error("{0}")]
    Balance(BalanceError),
    #[error("{0}")]
    Plan(PlanError),
    #[error("{0}")]
    Assemble(AssembleError),
    #[error("{0}")]
    Partition(PartitionError),
    #[error("{0}")]
    Config(ConfigError),
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        Self::new(ErrorClass::Configuration, ErrorOrigin::Key, err.to_string())
            .with_detail(ErrorDetail::Key(err))
    }
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        Self::new(ErrorClass::Configuration, ErrorOrigin::Filter, err.to_string())
            .with_detail(ErrorDetail::Filter(err))
    }
}

impl From<BalanceError> for Error {
    fn from(err: BalanceError) -> Self {
        let class = if err.is_infeasible() {
            ErrorClass::Infeasible
        } else {
            ErrorClass::Configuration
        };

        Self::new(class, ErrorOrigin::Balancer, err.to_string())
            .with_detail(ErrorDetail::Balance(err))
    }
}

impl From<PlanError> for Error {
    fn from(err: PlanError) -> Self {
        // balancer failures keep their own origin and class
        match err {
            PlanError::Balance(inner) => inner.into(),
            other => Self::new(
                ErrorClass::Configuration,
                ErrorOrigin::Planner,
                other.to_string(),
            )
            .with_detail(ErrorDetail::Plan(other)),
        }
    }
}

impl From<AssembleError> for Error {
    fn from(err: AssembleError) -> Self {
        let class = if err.is_invariant() {
            ErrorClass::InvariantViolation
        } else {
            ErrorClass::Configuration
        };

        Self::new(class, ErrorOrigin::Assembler, err.to_string())
            .with_detail(ErrorDetail::Assemble(err))
    }
}

impl From<PartitionError> for Error {
    fn from(err: PartitionError) -> Self {
        Self::new(
            ErrorClass::Configuration,
            ErrorOrigin::Partition,
            err.to_string(),
        )
        .with_detail(ErrorDetail::Partition(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Configuration, ErrorOrigin::Config, err.to_string())
            .with_detail(ErrorDetail::Config(err))
    }
}

///
/// ErrorClass
/// Error taxonomy for partitioning failures.
/// No class is retryable: the engine is deterministic.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Infeasible,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Infeasible => "infeasible",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Module that raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Key,
    Filter,
    Balancer,
    Planner,
    Assembler,
    Partition,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Key => "key",
            Self::Filter => "filter",
            Self::Balancer => "balancer",
            Self::Planner => "planner",
            Self::Assembler => "assembler",
            Self::Partition => "partition",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
