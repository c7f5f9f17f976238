//! # In-Memory Repositories
//!
//! In-memory implementations for tests and file-seeded deployments.
//!
//! ## Available Repositories
//!
//! - [`InMemoryProviderRepository`]: Provider store
//!
//! ## Thread Safety
//!
//! Storage is wrapped in `Arc<RwLock<..>>` for shared access.

pub mod provider_repository;

pub use provider_repository::InMemoryProviderRepository;
