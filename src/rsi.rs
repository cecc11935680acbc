use std::fmt::Display;

use crate::{
    Indicator, Price, Result, Sma, ToDecimal,
    decimal::{self, HUNDRED, ONE, ZERO},
    ema, validate,
};

use rust_decimal::Decimal;

/// How RSI obtains its seed averages from the first `period` movements.
///
/// Only the seed differs: every method continues with Wilder's
/// `(prev × (period − 1) + movement) / period` recurrence.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Smoothing {
    /// Arithmetic mean of the seed movements.
    Sma,
    /// Exponential average of the seed movements, started at the first
    /// movement with `α = 2 / (period + 1)`.
    Ema,
    /// Wilder's canonical RSI: arithmetic-mean seed.
    #[default]
    Wilder,
}

impl Display for Smoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Running RSI state after consuming a series.
///
/// A value snapshot: pass it to [`rsi_step`] with the next price to get the
/// successor state. `up_sum` and `down_sum` total every movement consumed,
/// seed included.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiState {
    /// Last price consumed; the next movement is measured from it.
    pub previous_price: Price,
    pub up_sum: Price,
    pub down_sum: Price,
    pub up_average: Price,
    pub down_average: Price,
}

impl RsiState {
    /// RSI derived from the stored averages.
    ///
    /// # Errors
    ///
    /// Arithmetic failures from the decimal adapter.
    pub fn rsi(&self) -> Result<Price> {
        rsi_from_averages(self.up_average, self.down_average)
    }

    fn advance(&self, price: Price, smoothing: &Wilder) -> Result<Self> {
        let (up, down) = movement(self.previous_price, price)?;

        Ok(Self {
            previous_price: price,
            up_sum: decimal::add(self.up_sum, up)?,
            down_sum: decimal::add(self.down_sum, down)?,
            up_average: smoothing.next(self.up_average, up)?,
            down_average: smoothing.next(self.down_average, down)?,
        })
    }
}

/// RSI value together with the state that produced it.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiStep {
    pub value: Price,
    pub state: RsiState,
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// The first `period` price changes produce the seed averages (see
/// [`Smoothing`]). After seeding, gains and losses are smoothed
/// with Wilder's method (`α = 1 / period`):
///
/// ```text
/// up_avg   = (prev_up_avg × (period − 1) + up) / period
/// down_avg = (prev_down_avg × (period − 1) + down) / period
/// RS       = up_avg / down_avg
/// RSI      = 100 − 100 / (1 + RS)
/// ```
///
/// RSI is evaluated as `100 × up_avg / (up_avg + down_avg)`, the same value
/// without the unbounded `RS` intermediate. A zero `down_avg` yields
/// exactly 100. The first value sits at index
/// `period`; series output is zero before it.
///
/// # Example
///
/// ```
/// use decimal_ta::Rsi;
/// use rust_decimal::Decimal;
///
/// let rsi = Rsi::new(3);
///
/// // changes = +1, +1, +1: no losses
/// assert_eq!(rsi.compute(&[10, 11, 12, 13]).unwrap(), Decimal::ONE_HUNDRED);
///
/// // changes = -1, -1, -1: no gains
/// assert_eq!(rsi.compute(&[13, 12, 11, 10]).unwrap(), Decimal::ZERO);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Rsi {
    period: usize,
    smoothing: Smoothing,
}

impl Rsi {
    /// Wilder's RSI over `period` movements.
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            smoothing: Smoothing::Wilder,
        }
    }

    #[must_use]
    pub fn builder() -> RsiBuilder {
        RsiBuilder::new()
    }

    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Running state after the whole series.
    ///
    /// # Errors
    ///
    /// As [`compute`](Indicator::compute).
    pub fn state<P: ToDecimal>(&self, series: &[P]) -> Result<RsiState> {
        validate::movements(Self::NAME, series.len(), self.period)?;

        self.walk(series, |_, _| Ok(()))
            .map_err(|e| e.within(Self::NAME))
    }

    /// Seeds from the first `period` movements, then advances one price at
    /// a time, handing each `(index, state)` to `visit`. Assumes validated
    /// input.
    fn walk<P: ToDecimal>(
        &self,
        series: &[P],
        mut visit: impl FnMut(usize, &RsiState) -> Result<()>,
    ) -> Result<RsiState> {
        let prices = decimal::parse_series(series)?;

        let mut ups = Vec::with_capacity(self.period);
        let mut downs = Vec::with_capacity(self.period);
        for pair in prices[..=self.period].windows(2) {
            let (up, down) = movement(pair[0], pair[1])?;
            ups.push(up);
            downs.push(down);
        }

        let (up_average, down_average) = match self.smoothing {
            Smoothing::Sma | Smoothing::Wilder => (
                Sma::new(self.period).compute(&ups)?,
                Sma::new(self.period).compute(&downs)?,
            ),
            Smoothing::Ema => (ema::from_first(&ups)?, ema::from_first(&downs)?),
        };
        tracing::trace!(
            period = self.period,
            smoothing = %self.smoothing,
            up_average = %up_average,
            down_average = %down_average,
            "RSI seeded"
        );

        let mut state = RsiState {
            previous_price: prices[self.period],
            up_sum: decimal::sum(&ups)?,
            down_sum: decimal::sum(&downs)?,
            up_average,
            down_average,
        };
        visit(self.period, &state)?;

        let wilder = Wilder::new(self.period)?;
        for (index, &price) in prices.iter().enumerate().skip(self.period + 1) {
            state = state.advance(price, &wilder)?;
            visit(index, &state)?;
        }

        Ok(state)
    }
}

impl Indicator for Rsi {
    const NAME: &'static str = "RSI";

    #[inline]
    fn period(&self) -> usize {
        self.period
    }

    fn compute<P: ToDecimal>(&self, series: &[P]) -> Result<Price> {
        validate::movements(Self::NAME, series.len(), self.period)?;

        self.walk(series, |_, _| Ok(()))
            .and_then(|state| state.rsi())
            .map_err(|e| e.within(Self::NAME))
    }

    fn compute_series<P: ToDecimal>(&self, series: &[P]) -> Result<Vec<Price>> {
        validate::movements(Self::NAME, series.len(), self.period)?;

        let mut out = vec![ZERO; series.len()];
        self.walk(series, |index, state| {
            out[index] = state.rsi()?;
            Ok(())
        })
        .map_err(|e| e.within(Self::NAME))?;

        Ok(out)
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.period, self.smoothing)
    }
}

/// Builder for [`Rsi`].
///
/// Defaults: smoothing = [`Smoothing::Wilder`].
/// Period must be set before calling [`build`](RsiBuilder::build).
pub struct RsiBuilder {
    period: Option<usize>,
    smoothing: Smoothing,
}

impl RsiBuilder {
    fn new() -> Self {
        Self {
            period: None,
            smoothing: Smoothing::Wilder,
        }
    }

    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = Some(period);
        self
    }

    #[inline]
    #[must_use]
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Builds the config. Panics if the period is missing.
    #[must_use]
    pub fn build(self) -> Rsi {
        Rsi {
            period: self.period.expect("period is required"),
            smoothing: self.smoothing,
        }
    }
}

/// Wilder's recurrence constants for one period.
struct Wilder {
    period: Decimal,
    retained: Decimal,
}

impl Wilder {
    fn new(period: usize) -> Result<Self> {
        let period = Decimal::from(period);
        Ok(Self {
            period,
            retained: decimal::sub(period, ONE)?,
        })
    }

    #[inline]
    fn next(&self, previous: Price, movement: Price) -> Result<Price> {
        decimal::div(
            decimal::add(decimal::mul(previous, self.retained)?, movement)?,
            self.period,
        )
    }
}

/// Splits a price change into `(up, down)`, both non-negative.
#[inline]
fn movement(previous: Price, price: Price) -> Result<(Price, Price)> {
    let change = decimal::sub(price, previous)?;

    Ok((change.max(ZERO), (-change).max(ZERO)))
}

/// `100 − 100 / (1 + RS)` rewritten as `100 × up / (up + down)`.
///
/// A long rally leaves `down_average` at the smallest representable step
/// rather than zero, where `RS` itself would overflow.
fn rsi_from_averages(up_average: Price, down_average: Price) -> Result<Price> {
    if down_average.is_zero() {
        return Ok(HUNDRED);
    }
    let total = decimal::add(up_average, down_average)?;

    decimal::div(decimal::mul(HUNDRED, up_average)?, total)
}

/// Final RSI of `series`.
///
/// ```
/// use decimal_ta::{Smoothing, rsi};
/// use rust_decimal::Decimal;
///
/// // changes = +1, -1: equal averages
/// assert_eq!(rsi(&[10, 11, 10], 2, Smoothing::Wilder).unwrap(), Decimal::from(50));
/// ```
///
/// # Errors
///
/// In order: [`EmptyDataset`](crate::IndicatorError::EmptyDataset),
/// [`RsiDatasetTooSmall`](crate::IndicatorError::RsiDatasetTooSmall),
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall),
/// [`PeriodExceedsDataset`](crate::IndicatorError::PeriodExceedsDataset)
/// (counting `len − 1` movements); then numeric failures wrapped in
/// [`IndicatorCalculation`](crate::IndicatorError::IndicatorCalculation).
pub fn rsi<P: ToDecimal>(series: &[P], period: usize, smoothing: Smoothing) -> Result<Price> {
    Rsi::builder()
        .period(period)
        .smoothing(smoothing)
        .build()
        .compute(series)
}

/// RSI per element, zero before index `period`.
///
/// # Errors
///
/// As [`rsi()`].
pub fn rsi_series<P: ToDecimal>(
    series: &[P],
    period: usize,
    smoothing: Smoothing,
) -> Result<Vec<Price>> {
    Rsi::builder()
        .period(period)
        .smoothing(smoothing)
        .build()
        .compute_series(series)
}

/// Running state after `series`, for continuing with [`rsi_step`].
///
/// # Errors
///
/// As [`rsi()`].
pub fn rsi_state<P: ToDecimal>(
    series: &[P],
    period: usize,
    smoothing: Smoothing,
) -> Result<RsiState> {
    Rsi::builder()
        .period(period)
        .smoothing(smoothing)
        .build()
        .state(series)
}

/// Consumes one new price with Wilder's recurrence.
///
/// ```
/// use decimal_ta::{Smoothing, rsi, rsi_state, rsi_step};
///
/// let history = [44, 45, 43, 46, 47];
/// let state = rsi_state(&history, 3, Smoothing::Wilder).unwrap();
/// let step = rsi_step(45, 3, &state).unwrap();
///
/// assert_eq!(step.value, rsi(&[44, 45, 43, 46, 47, 45], 3, Smoothing::Wilder).unwrap());
/// ```
///
/// # Errors
///
/// [`PeriodTooSmall`](crate::IndicatorError::PeriodTooSmall), then numeric
/// failures wrapped in
/// [`IndicatorCalculation`](crate::IndicatorError::IndicatorCalculation).
pub fn rsi_step<P: ToDecimal>(price: P, period: usize, state: &RsiState) -> Result<RsiStep> {
    validate::period(Rsi::NAME, period)?;

    let next = || -> Result<RsiStep> {
        let state = state.advance(price.to_decimal()?, &Wilder::new(period)?)?;
        Ok(RsiStep {
            value: state.rsi()?,
            state,
        })
    };

    next().map_err(|e| e.within(Rsi::NAME))
}
