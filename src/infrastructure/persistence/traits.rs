//! # Repository Traits
//!
//! Port definitions for the provider store.
//!
//! The ranking engine only reads providers; [`ProviderRepository::save`]
//! exists so stores can be seeded and kept current by whatever owns them.
//!
//! # Examples
//!
//! ```ignore
//! use remit_rank::infrastructure::persistence::traits::ProviderRepository;
//!
//! async fn print_codes(repo: &impl ProviderRepository) {
//!     for provider in repo.list_all().await.unwrap() {
//!         println!("{}", provider.code());
//!     }
//! }
//! ```

use crate::domain::entities::provider::Provider;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Provider store failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Two providers share a code.
    #[error("duplicate provider code: {code}")]
    Duplicate {
        /// The repeated code.
        code: String,
    },

    /// Provider records could not be decoded or failed validation.
    #[error("invalid provider data: {0}")]
    Serialization(String),

    /// Backing store could not be reached.
    #[error("provider store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Creates a duplicate code error.
    #[must_use]
    pub fn duplicate(code: impl Into<String>) -> Self {
        Self::Duplicate { code: code.into() }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Returns true for [`RepositoryError::Duplicate`].
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for money-transfer providers.
///
/// Implementations must return providers from [`list_all`](Self::list_all)
/// in a stable order: ranking ties are broken by that order.
#[async_trait]
pub trait ProviderRepository: Send + Sync + fmt::Debug {
    /// Saves a provider.
    ///
    /// A provider with the same code is replaced in place.
    async fn save(&self, provider: &Provider) -> RepositoryResult<()>;

    /// Gets a provider by its code.
    ///
    /// Returns `None` if no provider has that code.
    async fn get_by_code(&self, code: &str) -> RepositoryResult<Option<Provider>>;

    /// Lists every provider in store order.
    async fn list_all(&self) -> RepositoryResult<Vec<Provider>>;

    /// Counts the stored providers.
    async fn count(&self) -> RepositoryResult<u64>;
}
