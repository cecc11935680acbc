//! Exact decimal conversion and checked arithmetic.
//!
//! Every engine routes numeric input and arithmetic through this module so
//! that parse failures, zero denominators and overflows are reported the
//! same way everywhere.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

use crate::{IndicatorError, Result};

/// Exact decimal zero.
pub const ZERO: Decimal = Decimal::ZERO;
/// Exact decimal one.
pub const ONE: Decimal = Decimal::ONE;
/// Exact decimal two.
pub const TWO: Decimal = Decimal::TWO;
/// Exact decimal three.
pub const THREE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Exact decimal one hundred.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest number of fractional digits a [`Decimal`] can carry.
pub const MAX_PRECISION: u32 = 28;

/// Conversion of a caller-supplied value into an exact [`Decimal`].
///
/// Implemented for [`Decimal`], strings and all primitive numbers.
/// Floats go through their shortest round-trip text, so `0.1_f64` becomes
/// exactly `0.1` rather than its binary expansion. Text with more than
/// [`MAX_PRECISION`] fractional digits is rounded; a nonzero float that
/// would round to zero is rejected.
pub trait ToDecimal {
    /// Converts `self`, failing with
    /// [`InvalidNumericFormat`](IndicatorError::InvalidNumericFormat) when
    /// the value has no decimal representation.
    fn to_decimal(&self) -> Result<Decimal>;
}

impl<T: ToDecimal + ?Sized> ToDecimal for &T {
    #[inline]
    fn to_decimal(&self) -> Result<Decimal> {
        (**self).to_decimal()
    }
}

impl ToDecimal for Decimal {
    #[inline]
    fn to_decimal(&self) -> Result<Decimal> {
        Ok(*self)
    }
}

impl ToDecimal for str {
    fn to_decimal(&self) -> Result<Decimal> {
        parse(self)
    }
}

impl ToDecimal for String {
    fn to_decimal(&self) -> Result<Decimal> {
        parse(self)
    }
}

impl ToDecimal for f64 {
    fn to_decimal(&self) -> Result<Decimal> {
        float(&self.to_string(), self.is_finite(), *self == 0.0)
    }
}

impl ToDecimal for f32 {
    fn to_decimal(&self) -> Result<Decimal> {
        float(&self.to_string(), self.is_finite(), *self == 0.0)
    }
}

/// Parses a float's shortest text, rejecting non-finite values and nonzero
/// values lost below the smallest decimal step.
fn float(text: &str, finite: bool, zero: bool) -> Result<Decimal> {
    if !finite {
        return Err(invalid(text));
    }
    let value = parse(text)?;
    if value.is_zero() && !zero {
        tracing::debug!(value = text, "float underflows decimal precision");
        return Err(invalid(text));
    }
    Ok(value)
}

macro_rules! impl_to_decimal_from {
    ($($int:ty),*) => {
        $(
            impl ToDecimal for $int {
                #[inline]
                fn to_decimal(&self) -> Result<Decimal> {
                    Ok(Decimal::from(*self))
                }
            }
        )*
    };
}

impl_to_decimal_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToDecimal for i128 {
    fn to_decimal(&self) -> Result<Decimal> {
        Decimal::from_i128(*self).ok_or_else(|| invalid(self))
    }
}

impl ToDecimal for u128 {
    fn to_decimal(&self) -> Result<Decimal> {
        Decimal::from_u128(*self).ok_or_else(|| invalid(self))
    }
}

/// Parses plain (`"12.50"`) or scientific (`"1.25e1"`) notation.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`InvalidNumericFormat`](IndicatorError::InvalidNumericFormat) carrying
/// the raw input.
pub fn parse(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid(raw))
}

/// Converts a float through its shortest round-trip text, then rounds to
/// `precision` fractional digits (capped at [`MAX_PRECISION`]), midpoints
/// away from zero.
///
/// ```
/// use decimal_ta::decimal::from_f64_with_precision;
///
/// let price = from_f64_with_precision(1.0 / 3.0, 4).unwrap();
/// assert_eq!(price.to_string(), "0.3333");
/// ```
///
/// # Errors
///
/// [`InvalidNumericFormat`](IndicatorError::InvalidNumericFormat) for NaN,
/// infinities and magnitudes beyond the decimal range.
pub fn from_f64_with_precision(value: f64, precision: u32) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(invalid(&value));
    }

    Ok(parse(&value.to_string())?.round_dp_with_strategy(
        precision.min(MAX_PRECISION),
        RoundingStrategy::MidpointAwayFromZero,
    ))
}

/// Converts every element of `series`, stopping at the first failure.
///
/// # Errors
///
/// The first conversion error encountered.
pub fn parse_series<P: ToDecimal>(series: &[P]) -> Result<Vec<Decimal>> {
    series.iter().map(ToDecimal::to_decimal).collect()
}

/// # Errors
///
/// [`Overflow`](IndicatorError::Overflow) when the sum is out of range.
#[inline]
pub fn add(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or(IndicatorError::Overflow)
}

/// # Errors
///
/// [`Overflow`](IndicatorError::Overflow) when the difference is out of range.
#[inline]
pub fn sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or(IndicatorError::Overflow)
}

/// # Errors
///
/// [`Overflow`](IndicatorError::Overflow) when the product is out of range.
#[inline]
pub fn mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or(IndicatorError::Overflow)
}

/// Divides, rounding to the decimal's precision when the quotient does not
/// terminate.
///
/// # Errors
///
/// [`DivisionByZero`](IndicatorError::DivisionByZero) for a zero divisor,
/// [`Overflow`](IndicatorError::Overflow) when the quotient is out of range.
#[inline]
pub fn div(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    if rhs.is_zero() {
        return Err(IndicatorError::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(IndicatorError::Overflow)
}

/// Absolute value; never fails.
#[inline]
#[must_use]
pub fn abs(value: Decimal) -> Decimal {
    value.abs()
}

/// Sums a slice with overflow checking.
///
/// # Errors
///
/// [`Overflow`](IndicatorError::Overflow).
pub fn sum(values: &[Decimal]) -> Result<Decimal> {
    values.iter().try_fold(ZERO, |acc, &v| add(acc, v))
}

/// Arithmetic mean of a non-empty slice.
///
/// # Errors
///
/// [`DivisionByZero`](IndicatorError::DivisionByZero) for an empty slice,
/// [`Overflow`](IndicatorError::Overflow) from the sum.
pub fn mean(values: &[Decimal]) -> Result<Decimal> {
    div(sum(values)?, Decimal::from(values.len()))
}

fn invalid(raw: &(impl ToString + ?Sized)) -> IndicatorError {
    IndicatorError::InvalidNumericFormat {
        value: raw.to_string(),
    }
}
