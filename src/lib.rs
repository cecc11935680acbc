//! Exact-decimal technical analysis indicators for Rust.
//!
//! SMA, EMA, RSI and VWAP computed on [`rust_decimal::Decimal`], so
//! chained recurrences (an EMA over thousands of periods, Wilder's RSI
//! smoothing) never pick up binary floating-point error.
//!
//! Every operation is a pure function of its inputs. Streaming callers keep
//! the running state the engines return (the previous EMA, an [`RsiState`],
//! a [`Vwap`]) and pass it back with the next observation.
//!
//! Series inputs accept anything implementing [`ToDecimal`]: decimals,
//! strings, integers or floats (converted through their text form).
//!
//! Each series indicator type ([`Sma`], [`Ema`], [`Rsi`]) exposes
//! [`compute`](Sma::compute) and [`compute_series`](Sma::compute_series)
//! as inherent methods, no trait import needed. Import [`Indicator`] only
//! for generic code.
//!
//! # Example
//!
//! ```
//! use decimal_ta::{Smoothing, ema, rsi, sma, sma_all};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(sma_all(&[1, 2, 3]).unwrap(), Decimal::from(2));
//! assert_eq!(sma(&["1", "2", "3"], 2).unwrap(), Decimal::new(25, 1));
//!
//! let prices: Vec<i32> = (1..=10).collect();
//! assert_eq!(ema(&prices, 9).unwrap(), Decimal::from(6));
//! assert_eq!(rsi(&prices, 9, Smoothing::Wilder).unwrap(), Decimal::ONE_HUNDRED);
//! ```

pub mod decimal;
mod ema;
mod error;
mod indicator;
mod ohlcv;
mod price_source;
mod rsi;
mod sma;
mod validate;
mod vwap;

pub use crate::decimal::ToDecimal;
pub use crate::error::{IndicatorError, Result};
pub use crate::indicator::Indicator;
pub use crate::ohlcv::{DataPoint, Ohlcv, Price, Timestamp, Volume};
pub use crate::price_source::{PriceSource, prices};

pub use crate::ema::{Ema, EmaBuilder, EmaSeed, ema, ema_series, ema_step, multiplier};
pub use crate::rsi::{
    Rsi, RsiBuilder, RsiState, RsiStep, Smoothing, rsi, rsi_series, rsi_state, rsi_step,
};
pub use crate::sma::{Sma, sma, sma_all, sma_series};
pub use crate::vwap::{Vwap, vwap, vwap_series};

macro_rules! impl_indicator_methods {
    ($type:ty) => {
        impl $type {
            /// See [`Indicator::period`].
            #[must_use]
            #[inline]
            pub fn period(&self) -> usize {
                <Self as Indicator>::period(self)
            }

            /// See [`Indicator::compute`].
            ///
            /// # Errors
            ///
            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute<P: ToDecimal>(&self, series: &[P]) -> Result<Price> {
                <Self as Indicator>::compute(self, series)
            }

            /// See [`Indicator::compute_series`].
            ///
            /// # Errors
            ///
            /// See [`Indicator::compute_series`].
            #[inline]
            pub fn compute_series<P: ToDecimal>(&self, series: &[P]) -> Result<Vec<Price>> {
                <Self as Indicator>::compute_series(self, series)
            }
        }
    };
}

impl_indicator_methods!(Sma);
impl_indicator_methods!(Ema);
impl_indicator_methods!(Rsi);

#[cfg(test)]
mod test_util;
