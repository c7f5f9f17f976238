//! # Domain Entities
//!
//! - [`Provider`]: Money-transfer provider with fee rules and quality metrics

pub mod provider;

pub use provider::{Provider, ProviderId, QualityMetrics};
