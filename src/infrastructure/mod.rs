//! # Infrastructure Layer
//!
//! Adapters for the provider store and exchange rate sources.

pub mod persistence;
pub mod rates;
