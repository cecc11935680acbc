//! Ordered precondition checks run before any conversion or arithmetic.

use crate::{IndicatorError, Result};

pub(crate) const MIN_PERIOD: usize = 1;

/// Minimum number of prices RSI needs to derive one movement.
pub(crate) const MIN_RSI_LEN: usize = 2;

/// Checks `period >= 1`.
pub(crate) fn period(indicator: &'static str, period: usize) -> Result<()> {
    if period < MIN_PERIOD {
        tracing::debug!(indicator, period, "period below minimum");
        return Err(IndicatorError::PeriodTooSmall {
            period,
            minimum: MIN_PERIOD,
        });
    }
    Ok(())
}

/// Non-empty series, `period >= 1`, `period <= len`, in that order.
pub(crate) fn window(indicator: &'static str, len: usize, period: usize) -> Result<()> {
    if len == 0 {
        tracing::debug!(indicator, "empty dataset");
        return Err(IndicatorError::EmptyDataset);
    }
    self::period(indicator, period)?;
    if period > len {
        tracing::debug!(indicator, period, len, "period exceeds dataset");
        return Err(IndicatorError::PeriodExceedsDataset {
            period,
            available: len,
        });
    }
    Ok(())
}

/// At least two prices, `period >= 1`, `period <= len - 1`, in that order.
pub(crate) fn movements(indicator: &'static str, len: usize, period: usize) -> Result<()> {
    if len == 0 {
        tracing::debug!(indicator, "empty dataset");
        return Err(IndicatorError::EmptyDataset);
    }
    if len < MIN_RSI_LEN {
        tracing::debug!(indicator, len, "too few prices for movements");
        return Err(IndicatorError::RsiDatasetTooSmall { len });
    }
    window(indicator, len - 1, period)
}
