use thiserror::Error;

/// Failure returned by every indicator operation.
///
/// Validation variants are reported before any arithmetic runs. Numeric
/// variants come from the [`decimal`](crate::decimal) adapter and may be
/// wrapped in [`IndicatorCalculation`](Self::IndicatorCalculation) when they
/// occur while an indicator walks a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The input series has no elements.
    #[error("empty dataset: at least one element is required")]
    EmptyDataset,

    /// The period is below the indicator's minimum.
    #[error("period {period} is too small: minimum is {minimum}")]
    PeriodTooSmall { period: usize, minimum: usize },

    /// The period is larger than the data available to the indicator.
    #[error("period {period} exceeds dataset: only {available} elements available")]
    PeriodExceedsDataset { period: usize, available: usize },

    /// RSI needs at least two prices to derive one movement.
    #[error("RSI requires at least 2 prices, got {len}")]
    RsiDatasetTooSmall { len: usize },

    /// An input could not be represented as an exact decimal.
    #[error("invalid numeric format: {value:?}")]
    InvalidNumericFormat { value: String },

    /// A denominator was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A result did not fit the decimal or volume range.
    #[error("arithmetic overflow")]
    Overflow,

    /// A numeric failure raised while computing a named indicator.
    #[error("{indicator} calculation failed: {source}")]
    IndicatorCalculation {
        indicator: &'static str,
        #[source]
        source: Box<IndicatorError>,
    },
}

impl IndicatorError {
    /// Returns `true` for failures raised by decimal conversion or
    /// arithmetic, as opposed to input validation.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumericFormat { .. }
                | Self::DivisionByZero
                | Self::Overflow
                | Self::IndicatorCalculation { .. }
        )
    }

    /// Tags a numeric failure with the indicator that raised it.
    ///
    /// Validation errors and already tagged errors pass through unchanged.
    #[must_use]
    pub(crate) fn within(self, indicator: &'static str) -> Self {
        match self {
            Self::InvalidNumericFormat { .. } | Self::DivisionByZero | Self::Overflow => {
                tracing::debug!(indicator, error = %self, "indicator calculation failed");
                Self::IndicatorCalculation {
                    indicator,
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndicatorError>;
