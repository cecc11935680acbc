use crate::{
    IndicatorError, Ohlcv, Price, Result, Volume,
    decimal::{self, THREE, ZERO},
};

use rust_decimal::Decimal;

/// Volume-Weighted Average Price (VWAP) with its running totals.
///
/// Each step weights the observation's typical price
/// `(high + low + close) / 3` (see [`PriceSource::HLC3`](crate::PriceSource::HLC3))
/// by its volume:
///
/// ```text
/// cumulative_volume       += volume
/// cumulative_volume_price += typical × volume
/// VWAP                     = cumulative_volume_price / cumulative_volume
/// ```
///
/// The struct doubles as the running state: feed it back through
/// [`next`](Vwap::next) (or the totals through [`vwap`]) to extend the
/// sequence.
///
/// # Example
///
/// ```
/// use decimal_ta::{DataPoint, Vwap};
/// use rust_decimal::Decimal;
///
/// let d = Decimal::from;
/// let first = DataPoint::new(d(5), d(8), d(4), d(6), 10);
/// let second = DataPoint::new(d(6), d(12), d(9), d(9), 30);
///
/// let step = Vwap::zero().next(&first).unwrap();
/// assert_eq!(step.value, d(6));
///
/// // (60 + 10 × 30) / 40 = 9
/// let step = step.next(&second).unwrap();
/// assert_eq!(step.value, d(9));
/// assert_eq!(step.cumulative_volume, 40);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct Vwap {
    pub value: Price,
    pub cumulative_volume: Volume,
    pub cumulative_volume_price: Price,
}

impl Vwap {
    /// Initial state: no volume observed.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            value: ZERO,
            cumulative_volume: 0,
            cumulative_volume_price: ZERO,
        }
    }

    /// Consumes one more observation on top of these totals.
    ///
    /// # Errors
    ///
    /// As [`vwap`].
    pub fn next(&self, point: &impl Ohlcv) -> Result<Self> {
        vwap(point, self.cumulative_volume, self.cumulative_volume_price)
    }
}

/// One VWAP step from caller-held totals.
///
/// Pass `0` and [`Decimal::ZERO`] for the first observation.
///
/// # Errors
///
/// [`DivisionByZero`](IndicatorError::DivisionByZero) while the cumulative
/// volume is still zero, [`Overflow`](IndicatorError::Overflow) when a total
/// leaves its range.
pub fn vwap(
    point: &impl Ohlcv,
    cumulative_volume: Volume,
    cumulative_volume_price: Price,
) -> Result<Vwap> {
    // typical × volume, divided last so only one rounding enters the totals
    let components = decimal::sum(&[point.high(), point.low(), point.close()])?;
    let volume_price = decimal::div(
        decimal::mul(components, Decimal::from(point.volume()))?,
        THREE,
    )?;

    let cumulative_volume = cumulative_volume
        .checked_add(point.volume())
        .ok_or(IndicatorError::Overflow)?;
    let cumulative_volume_price = decimal::add(cumulative_volume_price, volume_price)?;

    let value = decimal::div(cumulative_volume_price, Decimal::from(cumulative_volume))
        .inspect_err(|e| tracing::debug!(cumulative_volume, error = %e, "VWAP step failed"))?;

    Ok(Vwap {
        value,
        cumulative_volume,
        cumulative_volume_price,
    })
}

/// VWAP for every observation, folding from [`Vwap::zero`].
///
/// ```
/// use decimal_ta::{DataPoint, vwap_series};
/// use rust_decimal::Decimal;
///
/// let d = Decimal::from;
/// let points = [
///     DataPoint::new(d(5), d(8), d(4), d(6), 10),
///     DataPoint::new(d(6), d(12), d(9), d(9), 30),
/// ];
///
/// let values: Vec<_> = vwap_series(&points).unwrap().iter().map(|v| v.value).collect();
/// assert_eq!(values, [d(6), d(9)]);
/// ```
///
/// # Errors
///
/// [`EmptyDataset`](IndicatorError::EmptyDataset) for no observations,
/// otherwise the first step failure. No partial output is returned.
pub fn vwap_series<T: Ohlcv>(points: &[T]) -> Result<Vec<Vwap>> {
    if points.is_empty() {
        tracing::debug!(indicator = "VWAP", "empty dataset");
        return Err(IndicatorError::EmptyDataset);
    }

    let mut out = Vec::with_capacity(points.len());
    let mut state = Vwap::zero();
    for point in points {
        state = state.next(point)?;
        out.push(state);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_near, hlcv};
    use rust_decimal_macros::dec;

    mod step {
        use super::*;

        #[test]
        fn first_observation() {
            assert_eq!(
                vwap(&hlcv(8, 4, 6, 10), 0, dec!(0)),
                Ok(Vwap {
                    value: dec!(6),
                    cumulative_volume: 10,
                    cumulative_volume_price: dec!(60),
                })
            );
        }

        #[test]
        fn zero_volume_first_observation() {
            assert_eq!(
                vwap(&hlcv(8, 4, 6, 0), 0, dec!(0)),
                Err(IndicatorError::DivisionByZero)
            );
        }

        #[test]
        fn zero_volume_after_history_keeps_value() {
            let state = vwap(&hlcv(8, 4, 6, 10), 0, dec!(0)).unwrap();
            let next = state.next(&hlcv(30, 20, 25, 0)).unwrap();
            assert_eq!(next.value, dec!(6));
            assert_eq!(next.cumulative_volume, 10);
        }

        #[test]
        fn volume_is_additive() {
            let next = vwap(&hlcv(8, 4, 6, 7), 13, dec!(100)).unwrap();
            assert_eq!(next.cumulative_volume, 20);
            // 100 + 6 × 7
            assert_eq!(next.cumulative_volume_price, dec!(142));
            assert_eq!(next.value, dec!(7.1));
        }

        #[test]
        fn non_terminating_typical_price() {
            // typical = (10 + 5 + 5) / 3 = 6.666...
            let value = vwap(&hlcv(10, 5, 5, 1), 0, dec!(0)).unwrap().value;
            assert_near!(value, dec!(20) / dec!(3));
        }

        #[test]
        fn non_terminating_typical_price_totals_stay_exact() {
            // 20 / 3 × 3 = 20 with no rounding residue
            let step = vwap(&hlcv(10, 5, 5, 3), 0, dec!(0)).unwrap();
            assert_eq!(step.cumulative_volume_price, dec!(20));
            assert_eq!(step.value, dec!(20) / dec!(3));
        }

        #[test]
        fn volume_overflow() {
            assert_eq!(
                vwap(&hlcv(8, 4, 6, 1), u64::MAX, dec!(0)),
                Err(IndicatorError::Overflow)
            );
        }

        #[test]
        fn uses_typical_not_close() {
            let point = crate::test_util::point(dec!(1), dec!(12), dec!(0), dec!(3), 2);
            // (12 + 0 + 3) / 3 = 5
            assert_eq!(vwap(&point, 0, dec!(0)).map(|v| v.value), Ok(dec!(5)));
        }
    }

    mod series {
        use super::*;

        #[test]
        fn index_aligned_with_input() {
            let points = [hlcv(8, 4, 6, 10), hlcv(12, 9, 9, 30), hlcv(10, 8, 9, 20)];
            let values = vwap_series(&points).unwrap();

            assert_eq!(values.len(), 3);
            assert_eq!(values[0].value, dec!(6));
            assert_eq!(values[1].value, dec!(9));
            // (360 + 9 × 20) / 60 = 9
            assert_eq!(values[2].value, dec!(9));
            assert_eq!(values[2].cumulative_volume, 60);
        }

        #[test]
        fn matches_threaded_steps() {
            let points = [hlcv(8, 4, 6, 10), hlcv(12, 9, 9, 30), hlcv(11, 7, 8, 5)];
            let batch = vwap_series(&points).unwrap();

            let mut state = Vwap::zero();
            for (point, expected) in points.iter().zip(&batch) {
                state = state.next(point).unwrap();
                assert_eq!(&state, expected);
            }
        }

        #[test]
        fn zero_volume_first_aborts_whole_batch() {
            let points = [hlcv(8, 4, 6, 0), hlcv(12, 9, 9, 30)];
            assert_eq!(vwap_series(&points), Err(IndicatorError::DivisionByZero));
        }

        #[test]
        fn empty() {
            let points: [crate::DataPoint; 0] = [];
            assert_eq!(vwap_series(&points), Err(IndicatorError::EmptyDataset));
        }
    }
}
