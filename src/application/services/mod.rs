//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`QuoteService`]: Validates a request, prices every provider and ranks them
//! - [`RankingStrategy`]: Strategies for ranking providers

pub mod quote_service;
pub mod ranking_strategy;

pub use quote_service::{QuoteConfig, QuoteService};
pub use ranking_strategy::{
    ComponentScores, CompositeScoreStrategy, RankingCandidate, RankingStrategy, ScoredCandidate,
};
