//! # Persistence Layer
//!
//! Provider store port and implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`ProviderRepository`]: Read access to money-transfer providers
//!
//! ## Implementations
//!
//! - `in_memory`: Ordered in-memory store, seedable from JSON

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryProviderRepository;
pub use traits::{ProviderRepository, RepositoryError, RepositoryResult};
