//! # Domain Layer
//!
//! Pure ranking logic: value objects, the provider entity, and the
//! services that evaluate fees and score candidates.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
