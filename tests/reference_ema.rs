mod fixtures;

use decimal_ta::{ema, ema_series, ema_step, sma};

use crate::fixtures::{assert_matches_reference, load_reference_ohlcvs, reference_closes};

const REF_PATH: &str = "tests/fixtures/data/ema-20-close.csv";

#[test]
fn ema_20_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let closes = reference_closes();

    let values = ema_series(&closes, 20).unwrap();

    assert_matches_reference("EMA(20)", &bars, &values, REF_PATH);
}

#[test]
fn ema_20_streaming_matches_batch() {
    let closes = reference_closes();
    let batch = ema_series(&closes, 20).unwrap();

    let mut value = sma(&closes[..20], 20).unwrap();
    assert_eq!(value, batch[19]);

    for (i, price) in closes.iter().enumerate().skip(20) {
        value = ema_step(price, 20, value).unwrap();
        assert_eq!(value, batch[i], "bar {i}");
    }

    assert_eq!(ema(&closes, 20), Ok(value));
}

#[test]
fn ema_20_accepts_text_prices() {
    let closes = reference_closes();
    let text: Vec<String> = closes.iter().map(ToString::to_string).collect();

    assert_eq!(ema(&text, 20), ema(&closes, 20));
}
