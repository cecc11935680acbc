mod fixtures;

use decimal_ta::{PriceSource, Sma, prices, sma, sma_series};

use crate::fixtures::{assert_matches_reference, load_ref_values, load_reference_ohlcvs};

const REF_PATH: &str = "tests/fixtures/data/sma-20-close.csv";

#[test]
fn sma_20_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let closes = prices(&bars, PriceSource::Close).unwrap();

    let values = sma_series(&closes, 20).unwrap();

    assert_matches_reference("SMA(20)", &bars, &values, REF_PATH);
}

/// Five-decimal prices over a window of 20 terminate, so every mean is exact.
#[test]
fn sma_20_is_exact() {
    let bars = load_reference_ohlcvs();
    let closes = prices(&bars, PriceSource::Close).unwrap();
    let values = Sma::new(20).compute_series(&closes).unwrap();

    for (value, reference) in values[19..].iter().zip(load_ref_values(REF_PATH)) {
        assert_eq!(*value, reference.expected, "t={}", reference.timestamp);
    }
}

#[test]
fn sma_20_prefix_matches_series() {
    let bars = load_reference_ohlcvs();
    let closes = prices(&bars, PriceSource::Close).unwrap();
    let series = sma_series(&closes, 20).unwrap();

    for end in 20..=closes.len() {
        assert_eq!(sma(&closes[..end], 20), Ok(series[end - 1]), "prefix {end}");
    }
}
