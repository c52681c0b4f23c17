use thiserror::Error;

/// Input contract violations surfaced at the engine boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("unrecognized feedstock category: {0:?}")]
    InvalidCategory(String),
    #[error("non-finite input: {field} = {value}")]
    NonFiniteInput { field: &'static str, value: f64 },
}

/// Rule-table construction failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("regime table has no rules")]
    Empty,
    #[error("rule {index}: bound is not finite")]
    NonFiniteBound { index: usize },
    #[error("rule {index}: bound does not increase over the previous rule")]
    Unordered { index: usize },
    #[error("rule {index}: only the last rule may be unbounded")]
    UnboundedNotLast { index: usize },
    #[error("last rule must be unbounded so every temperature is covered")]
    MissingUnboundedTail,
    #[error("rule {index}: fractions must be finite and non-negative")]
    InvalidFraction { index: usize },
    #[error("rule {index}: fractions sum to {total}, expected 1.0")]
    NotNormalized { index: usize, total: f64 },
}

/// Economic coefficient failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EconomicsError {
    #[error("{field} must be finite, got {value}")]
    NonFiniteCoefficient { field: &'static str, value: f64 },
}
