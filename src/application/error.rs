//! # Application Errors
//!
//! Error types surfaced by [`QuoteService`](crate::application::QuoteService).
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - invariant or arithmetic failure
//! ├── Infrastructure(InfrastructureError) - provider store / rate source
//! ├── Validation(String)                  - bad request input
//! ├── NoProvidersAvailable                - provider store is empty
//! └── UnsupportedCurrencyPair             - no usable rate for the pair
//! ```
//!
//! Degenerate scoring input (all fees zero, no positive landing) is never an
//! error; see the ranking strategy.
//!
//! # Examples
//!
//! ```
//! use remit_rank::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::unsupported_pair("USD", "XYZ");
//! assert_eq!(err.to_string(), "currency pair USD->XYZ not available");
//! assert!(err.is_client_error());
//!
//! let app_err: ApplicationError = InfrastructureError::timeout("rates after 5000ms").into();
//! assert!(app_err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use crate::infrastructure::rates::RateSourceError;
use thiserror::Error;

/// Failure of a collaborator the quote service depends on.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Provider store error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Exchange rate source error.
    #[error("rate source error: {0}")]
    RateSource(#[from] RateSourceError),

    /// A collaborator did not answer within the service bound.
    #[error("timeout: {0}")]
    Timeout(String),
}

impl InfrastructureError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Returns true if a later attempt may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::RateSource(e) => e.is_retryable(),
            Self::Repository(e) => e.is_retryable(),
        }
    }
}

/// Quote service error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain invariant violated while computing the quote.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Collaborator failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The provider store returned no providers.
    #[error("no providers available")]
    NoProvidersAvailable,

    /// No usable spot rate for the requested pair.
    #[error("currency pair {from}->{to} not available")]
    UnsupportedCurrencyPair {
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
    },
}

impl From<RepositoryError> for ApplicationError {
    fn from(e: RepositoryError) -> Self {
        Self::Infrastructure(e.into())
    }
}

impl From<RateSourceError> for ApplicationError {
    fn from(e: RateSourceError) -> Self {
        Self::Infrastructure(e.into())
    }
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unsupported currency pair error.
    #[must_use]
    pub fn unsupported_pair(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnsupportedCurrencyPair {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns true if a later attempt may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Infrastructure(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns true for [`ApplicationError::Validation`].
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the caller's request is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::UnsupportedCurrencyPair { .. }
        )
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
