//! # Application Layer
//!
//! Use-case orchestration on top of the domain services.
//!
//! - [`dto`]: Request and response contracts
//! - [`error`]: Application and infrastructure error types
//! - [`services`]: Quote service and ranking strategies

pub mod dto;
pub mod error;
pub mod services;

pub use dto::{QuoteRequest, QuoteResponse, ScoredCandidateView};
pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
pub use services::{QuoteConfig, QuoteService};
