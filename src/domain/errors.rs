//! # Domain Errors
//!
//! Error types for business rule violations in the ranking domain.
//!
//! # Examples
//!
//! ```
//! use remit_rank::domain::errors::DomainError;
//!
//! let err = DomainError::InvalidAmount("amount must be > 0".to_string());
//! assert!(err.to_string().contains("amount must be > 0"));
//! ```

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Transfer amount is not strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Exchange rate is not strictly positive.
    #[error("invalid rate: {0}")]
    InvalidRate(String),

    /// Currency code is malformed.
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    /// A fee rule carries an out-of-range value.
    #[error("invalid fee rule: {0}")]
    InvalidFeeRule(String),

    /// A metric scale has `max <= min` or non-finite bounds.
    #[error("invalid metric scale: {0}")]
    InvalidMetricScale(String),

    /// Criteria weights cannot be resolved into a distribution.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// Financial score coefficients are out of range.
    #[error("invalid scoring configuration: {0}")]
    InvalidScoringConfig(String),

    /// Checked decimal arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
