use rust_decimal::Decimal;

/// A price value.
///
/// Semantic alias for [`Decimal`]. All indicator outputs are exact decimals.
pub type Price = Decimal;

/// Traded volume of one observation.
pub type Volume = u64;

/// Observation open timestamp or sequence number.
pub type Timestamp = u64;

/// OHLCV observation consumed by [`vwap`](crate::vwap()) and
/// [`PriceSource`](crate::PriceSource).
///
/// Implement this on your own kline/candle type to feed it to the engines
/// without conversion. The engines expect `high >= low >= 0` and
/// `low <= close <= high` but do not check it.
///
/// # Example
///
/// ```
/// use decimal_ta::{Ohlcv, Price, Volume};
/// use rust_decimal::Decimal;
///
/// struct MyKline {
///     h: Decimal, l: Decimal, c: Decimal,
///     v: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.c }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> Volume { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price.
    fn open(&self) -> Price;

    /// Highest price.
    fn high(&self) -> Price;

    /// Lowest price.
    fn low(&self) -> Price;

    /// Closing (or latest) price.
    fn close(&self) -> Price;

    /// Volume traded during the observation.
    fn volume(&self) -> Volume;
}

/// One OHLCV observation with its metadata.
///
/// # Example
///
/// ```
/// use decimal_ta::DataPoint;
/// use rust_decimal::Decimal;
///
/// let point = DataPoint::new(
///     Decimal::from(5),
///     Decimal::from(8),
///     Decimal::from(4),
///     Decimal::from(6),
///     10,
/// )
/// .with_instrument("EUR_USD")
/// .with_granularity("M1")
/// .at(1_700_000_000)
/// .completed(true);
///
/// assert_eq!(point.instrument, "EUR_USD");
/// assert!(point.complete);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DataPoint {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
    /// Instrument identifier, e.g. `"EUR_USD"`.
    pub instrument: String,
    /// Granularity label, e.g. `"M1"` or `"H4"`.
    pub granularity: String,
    pub timestamp: Timestamp,
    /// Whether the observation period has fully elapsed.
    pub complete: bool,
}

impl DataPoint {
    #[must_use]
    pub fn new(open: Price, high: Price, low: Price, close: Price, volume: Volume) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: impl Into<String>) -> Self {
        self.granularity = granularity.into();
        self
    }

    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn completed(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }
}

impl Ohlcv for DataPoint {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> Volume {
        self.volume
    }
}
