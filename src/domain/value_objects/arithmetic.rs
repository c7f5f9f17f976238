//! # Checked Arithmetic
//!
//! Overflow-checked decimal math for fee and landing computation.
//!
//! Every money operation in the fee model goes through [`CheckedArithmetic`]
//! so that a pathological fee rule surfaces as an [`ArithmeticError`]
//! instead of a panic.
//!
//! ```
//! use remit_rank::domain::value_objects::arithmetic::{ArithmeticError, CheckedArithmetic};
//! use rust_decimal::Decimal;
//!
//! let net = Decimal::new(1000, 0).safe_sub(Decimal::new(5, 0)).unwrap();
//! assert_eq!(net.safe_mul(Decimal::new(110, 2)).unwrap(), Decimal::new(10945, 1));
//! assert_eq!(net.safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a checked decimal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Result exceeds the decimal range.
    #[error("arithmetic overflow")]
    Overflow,

    /// Result is below the decimal range.
    #[error("arithmetic underflow")]
    Underflow,

    /// Divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Checked binary operations returning `Result` rather than panicking.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` on underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Checked division.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` for a zero divisor and
    /// `ArithmeticError::Overflow` if the quotient is out of range.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Overflow-checked sum; empty input sums to zero.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the running total overflows.
///
/// ```
/// use remit_rank::domain::value_objects::arithmetic::safe_sum;
/// use rust_decimal::Decimal;
///
/// let total = safe_sum([Decimal::new(5, 0), Decimal::new(25, 1)]).unwrap();
/// assert_eq!(total, Decimal::new(75, 1));
/// ```
pub fn safe_sum<I>(values: I) -> ArithmeticResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, <Decimal as CheckedArithmetic>::safe_add)
}

/// Clamps `value` into optional `[min, max]` bounds; a missing bound is
/// open on that side. If `min > max`, `max` wins.
#[inline]
#[must_use]
pub fn clamp_decimal(value: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> Decimal {
    let floored = min.map_or(value, |lo| value.max(lo));
    max.map_or(floored, |hi| floored.min(hi))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn fee_then_convert() {
        let net = dec("1000").safe_sub(dec("4.14")).unwrap();
        assert_eq!(net.safe_mul(dec("0.92")).unwrap(), dec("916.1912"));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(Decimal::MAX.safe_add(Decimal::ONE), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MAX.safe_mul(dec("2")), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MIN.safe_sub(Decimal::ONE), Err(ArithmeticError::Underflow));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(dec("5").safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
        assert_eq!(dec("5").safe_div(dec("2")).unwrap(), dec("2.5"));
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(safe_sum(Vec::new()).unwrap(), Decimal::ZERO);
        assert_eq!(safe_sum([Decimal::MAX, Decimal::MAX]), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_decimal(dec("1"), Some(dec("2.99")), None), dec("2.99"));
        assert_eq!(clamp_decimal(dec("50"), None, Some(dec("9.99"))), dec("9.99"));
        assert_eq!(clamp_decimal(dec("5"), Some(dec("2.99")), Some(dec("9.99"))), dec("5"));
        assert_eq!(clamp_decimal(dec("7"), None, None), dec("7"));
        assert_eq!(clamp_decimal(dec("5"), Some(dec("8")), Some(dec("6"))), dec("6"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "division by zero");
    }
}
