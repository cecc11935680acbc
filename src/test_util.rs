// src/test_util.rs

use crate::{DataPoint, Price, Volume};
use rust_decimal::Decimal;

/// Asserts that two decimals differ by no more than `1e-20`.
///
/// Exact comparisons are used wherever the result terminates; this is for
/// non-terminating quotients rounded at 28 digits.
macro_rules! assert_near {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (rust_decimal::Decimal, rust_decimal::Decimal) = ($actual, $expected);
        let tolerance = rust_decimal::Decimal::new(1, 20);
        assert!(
            (a - e).abs() <= tolerance,
            "assert_near failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_near;

pub fn point(open: Price, high: Price, low: Price, close: Price, volume: Volume) -> DataPoint {
    DataPoint::new(open, high, low, close, volume)
}

/// Observation with only high, low, close and volume set (open = close).
pub fn hlcv(high: i64, low: i64, close: i64, volume: Volume) -> DataPoint {
    let close = Decimal::from(close);
    point(close, Decimal::from(high), Decimal::from(low), close, volume)
}

/// Integer series as decimals.
pub fn series(values: &[i64]) -> Vec<Price> {
    values.iter().copied().map(Decimal::from).collect()
}
