use crate::{
    Ohlcv, Price, Result,
    decimal::{self, THREE, TWO},
};

use std::fmt::Display;

use rust_decimal::Decimal;

/// Price extracted from an [`Ohlcv`] observation.
///
/// Turns OHLCV data into the plain price series the SMA, EMA and RSI
/// engines consume. VWAP always works on [`HLC3`](Self::HLC3).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    /// Extracts this source's price from `ohlcv`.
    ///
    /// # Errors
    ///
    /// [`Overflow`](crate::IndicatorError::Overflow) when the summed
    /// components leave the decimal range.
    pub fn extract(self, ohlcv: &impl Ohlcv) -> Result<Price> {
        match self {
            Self::Open => Ok(ohlcv.open()),
            Self::High => Ok(ohlcv.high()),
            Self::Close => Ok(ohlcv.close()),
            Self::Low => Ok(ohlcv.low()),
            Self::HL2 => decimal::div(decimal::add(ohlcv.high(), ohlcv.low())?, TWO),
            Self::HLC3 => average(&[ohlcv.high(), ohlcv.low(), ohlcv.close()], THREE),
            Self::OHLC4 => average(
                &[ohlcv.open(), ohlcv.high(), ohlcv.low(), ohlcv.close()],
                Decimal::from(4),
            ),
            Self::HLCC4 => average(
                &[ohlcv.high(), ohlcv.low(), ohlcv.close(), ohlcv.close()],
                Decimal::from(4),
            ),
        }
    }
}

/// Extracts `source` from every observation, preserving order.
///
/// ```
/// use decimal_ta::{DataPoint, PriceSource, prices, sma};
/// use rust_decimal::Decimal;
///
/// let points: Vec<DataPoint> = [1, 2, 3]
///     .into_iter()
///     .map(|c| {
///         let c = Decimal::from(c);
///         DataPoint::new(c, c, c, c, 1)
///     })
///     .collect();
///
/// let closes = prices(&points, PriceSource::Close).unwrap();
/// assert_eq!(sma(&closes, 3).unwrap(), Decimal::from(2));
/// ```
///
/// # Errors
///
/// The first extraction failure.
pub fn prices<T: Ohlcv>(points: &[T], source: PriceSource) -> Result<Vec<Price>> {
    points.iter().map(|point| source.extract(point)).collect()
}

fn average(components: &[Price], count: Decimal) -> Result<Price> {
    decimal::div(decimal::sum(components)?, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::point;
    use rust_decimal_macros::dec;

    fn sample() -> crate::DataPoint {
        // open 10, high 30, low 5, close 20
        point(dec!(10), dec!(30), dec!(5), dec!(20), 0)
    }

    #[test]
    fn extract_open() {
        assert_eq!(PriceSource::Open.extract(&sample()), Ok(dec!(10)));
    }

    #[test]
    fn extract_high() {
        assert_eq!(PriceSource::High.extract(&sample()), Ok(dec!(30)));
    }

    #[test]
    fn extract_low() {
        assert_eq!(PriceSource::Low.extract(&sample()), Ok(dec!(5)));
    }

    #[test]
    fn extract_close() {
        assert_eq!(PriceSource::Close.extract(&sample()), Ok(dec!(20)));
    }

    #[test]
    fn extract_hl2() {
        // (30 + 5) / 2 = 17.5
        assert_eq!(PriceSource::HL2.extract(&sample()), Ok(dec!(17.5)));
    }

    #[test]
    fn extract_hlc3() {
        // (30 + 5 + 20) / 3 = 18.333...
        let result = PriceSource::HLC3.extract(&sample()).unwrap();
        assert_eq!(result, dec!(55) / dec!(3));
    }

    #[test]
    fn extract_ohlc4() {
        // (10 + 30 + 5 + 20) / 4 = 16.25
        assert_eq!(PriceSource::OHLC4.extract(&sample()), Ok(dec!(16.25)));
    }

    #[test]
    fn extract_hlcc4() {
        // (30 + 5 + 20 + 20) / 4 = 18.75
        assert_eq!(PriceSource::HLCC4.extract(&sample()), Ok(dec!(18.75)));
    }

    #[test]
    fn default_is_close() {
        assert_eq!(PriceSource::default(), PriceSource::Close);
        assert_eq!(PriceSource::HLC3.to_string(), "HLC3");
    }

    #[test]
    fn prices_keep_order() {
        let points = [
            point(dec!(1), dec!(4), dec!(0), dec!(2), 0),
            point(dec!(2), dec!(6), dec!(2), dec!(4), 0),
        ];
        assert_eq!(
            prices(&points, PriceSource::HL2),
            Ok(vec![dec!(2), dec!(4)])
        );
    }

    #[test]
    fn overflowing_components() {
        let p = point(dec!(0), Decimal::MAX, Decimal::MAX, dec!(0), 0);
        assert_eq!(
            PriceSource::HL2.extract(&p),
            Err(crate::IndicatorError::Overflow)
        );
    }
}
