#![allow(dead_code)]

use decimal_ta::{Ohlcv, Price, Timestamp, Volume};
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};

/// One-minute OHLCV bar parsed from the reference CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl Ohlcv for RefBar {
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

/// Reference value keyed by bar timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub timestamp: Timestamp,
    pub expected: Decimal,
}

const OHLCV_PATH: &str = "tests/fixtures/data/eurusd-m1.csv";

/// Load the reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Closing prices of the reference bars.
pub fn reference_closes() -> Vec<Price> {
    load_reference_ohlcvs().iter().map(|b| b.close).collect()
}

/// Load single-value reference data (SMA, EMA, RSI, VWAP).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Reference values are computed at 40 significant digits and rounded to
/// 20 decimal places.
pub fn tolerance() -> Decimal {
    Decimal::new(1, 15)
}

/// Assert two decimals are within tolerance.
pub fn assert_near(actual: Decimal, expected: Decimal, tolerance: Decimal, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected}, got {actual}, diff {diff} > tolerance {tolerance}"
    );
}

/// Checks `values` (index-aligned with the reference bars) against every
/// reference row, matching rows to bars by timestamp.
pub fn assert_matches_reference(name: &str, bars: &[RefBar], values: &[Decimal], path: &str) {
    assert_eq!(bars.len(), values.len(), "{name}: output not index-aligned");

    let reference = load_ref_values(path);
    let mut ref_idx = 0;

    for (bar, value) in bars.iter().zip(values) {
        if ref_idx < reference.len() && bar.timestamp == reference[ref_idx].timestamp {
            assert_near(
                *value,
                reference[ref_idx].expected,
                tolerance(),
                &format!("{name} at bar {ref_idx} (t={})", bar.timestamp),
            );
            ref_idx += 1;
        }
    }

    assert_eq!(
        ref_idx,
        reference.len(),
        "not all reference values checked: {ref_idx}/{}",
        reference.len()
    );
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
