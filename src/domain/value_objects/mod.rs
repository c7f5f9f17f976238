//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Money
//!
//! - [`Amount`]: Strictly positive transfer amount
//! - [`SpotRate`]: Strictly positive exchange rate
//! - [`CurrencyCode`]: Uppercase three-letter currency code
//!
//! ## Fees
//!
//! - [`FeeRule`], [`FeeRuleSet`]: Tagged fee rule variants
//!
//! ## Scoring
//!
//! - [`Criterion`]: The fixed ranking criteria
//! - [`CriteriaWeights`]: Normalised weight distribution
//! - [`MetricScale`]: Raw range of quality metrics
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations

pub mod arithmetic;
pub mod currency;
pub mod enums;
pub mod fee_rule;
pub mod metric_scale;
pub mod money;
pub mod weights;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use currency::CurrencyCode;
pub use enums::{Criterion, ParseEnumError};
pub use fee_rule::{FeeRule, FeeRuleSet};
pub use metric_scale::MetricScale;
pub use money::{Amount, SpotRate};
pub use weights::CriteriaWeights;
