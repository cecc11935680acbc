use std::fmt::Display;

use crate::{
    Indicator, Price, Result, ToDecimal,
    decimal::{self, ZERO},
    validate,
};

use rust_decimal::Decimal;

/// Simple Moving Average (SMA).
///
/// The exact, unweighted mean of the last *n* elements of a series, where
/// *n* is the configured period.
///
/// # Example
///
/// ```rust
/// use decimal_ta::Sma;
/// use rust_decimal::Decimal;
///
/// let sma = Sma::new(2);
///
/// assert_eq!(sma.compute(&["1", "2", "3"]).unwrap(), Decimal::new(25, 1));
/// assert_eq!(
///     sma.compute_series(&[1, 2, 3]).unwrap(),
///     [Decimal::ZERO, Decimal::new(15, 1), Decimal::new(25, 1)],
/// );
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Sma {
    period: usize,
}

impl Sma {
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    const NAME: &'static str = "SMA";

    #[inline]
    fn period(&self) -> usize {
        self.period
    }

    fn compute<P: ToDecimal>(&self, series: &[P]) -> Result<Price> {
        validate::window(Self::NAME, series.len(), self.period)?;

        // Only the trailing window contributes, so only it is converted.
        let window = decimal::parse_series(&series[series.len() - self.period..])?;

        decimal::mean(&window)
    }

    fn compute_series<P: ToDecimal>(&self, series: &[P]) -> Result<Vec<Price>> {
        validate::window(Self::NAME, series.len(), self.period)?;

        let prices = decimal::parse_series(series)?;
        rolling_means(&prices, self.period)
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.period)
    }
}

/// Mean of the last `period` elements of `series`.
///
/// ```
/// use decimal_ta::sma;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sma(&[1, 2, 3], 2).unwrap(), Decimal::new(25, 1));
/// ```
///
/// # Errors
///
/// In order: [`EmptyDataset`](crate::IndicatorError::EmptyDataset),
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall),
/// [`PeriodExceedsDataset`](crate::IndicatorError::PeriodExceedsDataset);
/// then conversion or arithmetic errors, unwrapped.
pub fn sma<P: ToDecimal>(series: &[P], period: usize) -> Result<Price> {
    Sma::new(period).compute(series)
}

/// Mean of the whole series: `sma(series, series.len())`.
///
/// # Errors
///
/// As [`sma`].
pub fn sma_all<P: ToDecimal>(series: &[P]) -> Result<Price> {
    sma(series, series.len())
}

/// Rolling SMA, index-aligned with `series`; zero before index `period - 1`.
///
/// # Errors
///
/// As [`sma`].
pub fn sma_series<P: ToDecimal>(series: &[P], period: usize) -> Result<Vec<Price>> {
    Sma::new(period).compute_series(series)
}

/// Sliding-window means over already converted prices.
///
/// Decimal addition is exact, so the running sum does not drift.
pub(crate) fn rolling_means(prices: &[Price], period: usize) -> Result<Vec<Price>> {
    let divisor = Decimal::from(period);
    let mut out = vec![ZERO; period - 1];
    out.reserve(prices.len() + 1 - period);

    let mut sum = decimal::sum(&prices[..period])?;
    out.push(decimal::div(sum, divisor)?);

    for (old, new) in prices.iter().zip(&prices[period..]) {
        sum = decimal::add(decimal::sub(sum, *old)?, *new)?;
        out.push(decimal::div(sum, divisor)?);
    }

    Ok(out)
}
