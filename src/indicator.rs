use crate::{Price, Result, ToDecimal};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// A price-series indicator.
///
/// Implementors are parameter values (period, smoothing choice): cheap to
/// copy, compare and hash. They hold no state between calls; the same
/// series always yields the same output.
///
/// # Example
///
/// ```
/// use decimal_ta::{Indicator, Sma};
/// use rust_decimal::Decimal;
///
/// fn last_and_all<I: Indicator>(indicator: I, series: &[i64]) -> (Decimal, Vec<Decimal>) {
///     (
///         indicator.compute(series).unwrap(),
///         indicator.compute_series(series).unwrap(),
///     )
/// }
///
/// let (last, all) = last_and_all(Sma::new(2), &[10, 20, 30]);
/// assert_eq!(last, Decimal::from(25));
/// assert_eq!(all, [0, 15, 25].map(Decimal::from));
/// ```
pub trait Indicator: Sized + Copy + Eq + Hash + Display + Debug + Send + Sync {
    /// Short name used to tag calculation errors, e.g. `"EMA"`.
    const NAME: &'static str;

    /// Smoothing/averaging window length.
    fn period(&self) -> usize;

    /// Computes the indicator's value at the last element of `series`.
    ///
    /// # Errors
    ///
    /// Validation errors before any arithmetic, then numeric errors from the
    /// [`decimal`](crate::decimal) adapter.
    fn compute<P: ToDecimal>(&self, series: &[P]) -> Result<Price>;

    /// Computes one value per input element, index-aligned with `series`.
    ///
    /// Positions before the first defined value hold zero.
    ///
    /// # Errors
    ///
    /// As [`compute`](Indicator::compute). No partial output is returned.
    fn compute_series<P: ToDecimal>(&self, series: &[P]) -> Result<Vec<Price>>;
}
