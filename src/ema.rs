use std::fmt::Display;

use crate::{
    Indicator, Price, Result, ToDecimal,
    decimal::{self, ONE, TWO, ZERO},
    validate,
};

use rust_decimal::Decimal;

/// How the EMA recurrence is seeded before smoothing starts.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum EmaSeed {
    /// SMA of the first `period` elements of the whole series, placed at
    /// index `period - 1`. Every later element applies one recurrence step.
    #[default]
    Sma,
    /// First element of the trailing `period`-element window, with the
    /// recurrence applied across the rest of that window only.
    WindowStart,
}

impl Display for EmaSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (period + 1)`. Each value is computed as:
///
/// ```text
/// EMA = price × α + prev_EMA × (1 − α)
/// ```
///
/// `1 − α` is derived from the rounded `α`, so the two weights always sum
/// to exactly one.
///
/// # Seeding
///
/// With the default [`EmaSeed::Sma`] the first value is the SMA of the
/// first `period` elements. [`EmaSeed::WindowStart`] instead starts from
/// the first element of the trailing window, so only the last `period`
/// elements influence the result.
///
/// # Example
///
/// ```
/// use decimal_ta::{Ema, EmaSeed};
/// use rust_decimal::Decimal;
///
/// let ema = Ema::new(3);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4
/// // EMA(3) α = 0.5: 8 × 0.5 + 4 × 0.5 = 6
/// assert_eq!(
///     ema.compute_series(&[2, 4, 6, 8]).unwrap(),
///     [0, 0, 4, 6].map(Decimal::from),
/// );
///
/// // Window [4, 6, 8] seeded at 4: 6 × 0.5 + 4 × 0.5 = 5, then 8 × 0.5 + 5 × 0.5
/// let windowed = Ema::builder().period(3).seed(EmaSeed::WindowStart).build();
/// assert_eq!(windowed.compute(&[2, 4, 6, 8]).unwrap(), Decimal::new(65, 1));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Ema {
    period: usize,
    seed: EmaSeed,
}

impl Ema {
    /// EMA over `period` elements with the default SMA seed.
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            seed: EmaSeed::Sma,
        }
    }

    #[must_use]
    pub fn builder() -> EmaBuilder {
        EmaBuilder::new()
    }

    #[must_use]
    pub fn seed(&self) -> EmaSeed {
        self.seed
    }

    /// Walks the recurrence, reporting `(index, value)` from the seed index
    /// onwards, and returns the final value. Assumes validated input.
    fn walk<P: ToDecimal>(&self, series: &[P], mut visit: impl FnMut(usize, Price)) -> Result<Price> {
        let (start, seed) = match self.seed {
            EmaSeed::Sma => (
                self.period - 1,
                decimal::mean(&decimal::parse_series(&series[..self.period])?)?,
            ),
            EmaSeed::WindowStart => {
                let start = series.len() - self.period;
                (start, series[start].to_decimal()?)
            }
        };
        tracing::trace!(period = self.period, seed = %seed, start, "EMA seeded");

        let alpha = smoothing(self.period)?;
        let retained = decimal::sub(ONE, alpha)?;

        visit(start, seed);

        let mut current = seed;
        for (index, price) in series.iter().enumerate().skip(start + 1) {
            current = step(price.to_decimal()?, current, alpha, retained)?;
            visit(index, current);
        }

        Ok(current)
    }
}

impl Indicator for Ema {
    const NAME: &'static str = "EMA";

    #[inline]
    fn period(&self) -> usize {
        self.period
    }

    fn compute<P: ToDecimal>(&self, series: &[P]) -> Result<Price> {
        validate::window(Self::NAME, series.len(), self.period)?;

        self.walk(series, |_, _| {})
            .map_err(|e| e.within(Self::NAME))
    }

    fn compute_series<P: ToDecimal>(&self, series: &[P]) -> Result<Vec<Price>> {
        validate::window(Self::NAME, series.len(), self.period)?;

        let mut out = vec![ZERO; series.len()];
        self.walk(series, |index, value| out[index] = value)
            .map_err(|e| e.within(Self::NAME))?;

        Ok(out)
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.period, self.seed)
    }
}

/// Builder for [`Ema`].
///
/// Defaults: seed = [`EmaSeed::Sma`].
/// Period must be set before calling [`build`](EmaBuilder::build).
pub struct EmaBuilder {
    period: Option<usize>,
    seed: EmaSeed,
}

impl EmaBuilder {
    fn new() -> Self {
        Self {
            period: None,
            seed: EmaSeed::Sma,
        }
    }

    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period.replace(period);
        self
    }

    #[inline]
    #[must_use]
    pub fn seed(mut self, seed: EmaSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the config. Panics if the period is missing.
    #[must_use]
    pub fn build(self) -> Ema {
        Ema {
            period: self.period.expect("period is required"),
            seed: self.seed,
        }
    }
}

/// Smoothing multiplier `2 / (period + 1)`.
///
/// # Errors
///
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall) for a zero
/// period.
pub fn multiplier(period: usize) -> Result<Price> {
    validate::period(Ema::NAME, period)?;
    smoothing(period).map_err(|e| e.within(Ema::NAME))
}

/// Applies one recurrence step to `price` given the previous EMA.
///
/// This is the streaming primitive: thread the returned value back in as
/// `previous_ema` for the next price.
///
/// ```
/// use decimal_ta::ema_step;
/// use rust_decimal::Decimal;
///
/// // α = 2 / 10 = 0.2: 10 × 0.2 + 5 × 0.8 = 6
/// assert_eq!(ema_step(10, 9, 5).unwrap(), Decimal::from(6));
/// ```
///
/// # Errors
///
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall), then
/// conversion or arithmetic failures wrapped in
/// [`IndicatorCalculation`](crate::IndicatorError::IndicatorCalculation).
pub fn ema_step<P, Q>(price: P, period: usize, previous_ema: Q) -> Result<Price>
where
    P: ToDecimal,
    Q: ToDecimal,
{
    validate::period(Ema::NAME, period)?;

    let next = || -> Result<Price> {
        let alpha = smoothing(period)?;
        step(
            price.to_decimal()?,
            previous_ema.to_decimal()?,
            alpha,
            decimal::sub(ONE, alpha)?,
        )
    };

    next().map_err(|e| e.within(Ema::NAME))
}

/// Final SMA-seeded EMA of `series`.
///
/// # Errors
///
/// In order: [`EmptyDataset`](crate::IndicatorError::EmptyDataset),
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall),
/// [`PeriodExceedsDataset`](crate::IndicatorError::PeriodExceedsDataset);
/// then numeric failures wrapped in
/// [`IndicatorCalculation`](crate::IndicatorError::IndicatorCalculation).
pub fn ema<P: ToDecimal>(series: &[P], period: usize) -> Result<Price> {
    Ema::new(period).compute(series)
}

/// SMA-seeded EMA per element, zero before index `period - 1`.
///
/// # Errors
///
/// As [`ema`].
pub fn ema_series<P: ToDecimal>(series: &[P], period: usize) -> Result<Vec<Price>> {
    Ema::new(period).compute_series(series)
}

/// EMA across the whole of `values`, seeded with its first element.
/// Expects a non-empty slice.
pub(crate) fn from_first(values: &[Price]) -> Result<Price> {
    Ema::builder()
        .period(values.len())
        .seed(EmaSeed::WindowStart)
        .build()
        .walk(values, |_, _| {})
}

fn smoothing(period: usize) -> Result<Price> {
    let denominator = decimal::add(Decimal::from(period), ONE)?;
    decimal::div(TWO, denominator)
}

#[inline]
fn step(price: Price, previous: Price, alpha: Price, retained: Price) -> Result<Price> {
    decimal::add(decimal::mul(price, alpha)?, decimal::mul(previous, retained)?)
}
