//! # Domain Enums
//!
//! Enumeration types for ranking concepts.
//!
//! - [`Criterion`] - The fixed set of ranking criteria a caller can weight
//! - [`ParseEnumError`] - Error returned when parsing an enum from text
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A ranking criterion.
///
/// `FeesFx` is scored by the financial sub-scorer; the other five are
/// provider quality metrics scored by the metric normalizer. Declaration
/// order is the canonical order used in serialized weight maps.
///
/// # Examples
///
/// ```
/// use remit_rank::domain::value_objects::enums::Criterion;
///
/// let c: Criterion = "customer_satisfaction".parse().unwrap();
/// assert_eq!(c, Criterion::CustomerSatisfaction);
/// assert!(c.is_quality());
/// assert!(!Criterion::FeesFx.is_quality());
/// assert_eq!(Criterion::FeesFx.to_string(), "fees_fx");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Criterion {
    /// Fees and FX outcome (landing amount and total fees).
    FeesFx = 0,
    /// Provider trust score.
    Trust = 1,
    /// Service quality score.
    Service = 2,
    /// Customer satisfaction score.
    CustomerSatisfaction = 3,
    /// Reliability score.
    Reliability = 4,
    /// Transfer speed score.
    Speed = 5,
}

impl Criterion {
    /// All criteria in canonical order.
    pub const ALL: [Self; 6] = [
        Self::FeesFx,
        Self::Trust,
        Self::Service,
        Self::CustomerSatisfaction,
        Self::Reliability,
        Self::Speed,
    ];

    /// Returns the snake_case wire name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FeesFx => "fees_fx",
            Self::Trust => "trust",
            Self::Service => "service",
            Self::CustomerSatisfaction => "customer_satisfaction",
            Self::Reliability => "reliability",
            Self::Speed => "speed",
        }
    }

    /// Returns true if this criterion is a provider quality metric.
    #[inline]
    #[must_use]
    pub const fn is_quality(self) -> bool {
        !matches!(self, Self::FeesFx)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fees_fx" => Ok(Self::FeesFx),
            "trust" => Ok(Self::Trust),
            "service" => Ok(Self::Service),
            "customer_satisfaction" => Ok(Self::CustomerSatisfaction),
            "reliability" => Ok(Self::Reliability),
            "speed" => Ok(Self::Speed),
            _ => Err(ParseEnumError::InvalidValue("Criterion", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_names() {
        for c in Criterion::ALL {
            assert_eq!(c.as_str().parse::<Criterion>().unwrap(), c);
        }
    }

    #[test]
    fn parse_is_lenient_on_case_and_dashes() {
        assert_eq!(
            "Customer-Satisfaction".parse::<Criterion>().unwrap(),
            Criterion::CustomerSatisfaction
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "price".parse::<Criterion>().unwrap_err();
        assert_eq!(err.to_string(), "invalid Criterion value: 'price'");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Criterion::FeesFx).unwrap();
        assert_eq!(json, "\"fees_fx\"");
        let back: Criterion = serde_json::from_str("\"speed\"").unwrap();
        assert_eq!(back, Criterion::Speed);
    }

    #[test]
    fn only_fees_fx_is_financial() {
        let quality: Vec<_> = Criterion::ALL.iter().filter(|c| c.is_quality()).collect();
        assert_eq!(quality.len(), 5);
    }
}
