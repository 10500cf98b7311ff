use thiserror::Error;

/// Validation and contract errors exposed by `tickdeck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("company name cannot be empty")]
    EmptyCompany,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("time of day must be HH:MM in 24-hour form: '{value}'")]
    InvalidTimeOfDay { value: String },
    #[error("date must be ISO YYYY-MM-DD: '{value}'")]
    InvalidIsoDate { value: String },
    #[error("market open time '{open}' must be before close time '{close}'")]
    OpenNotBeforeClose { open: String, close: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("timestamp out of range: {millis}ms since epoch")]
    TimestampOutOfRange { millis: i64 },

    #[error("chart layout requires at least one bar")]
    EmptyBarSeries,
    #[error("chart {dimension} must be a positive number of pixels")]
    InvalidChartDimension { dimension: &'static str },

    #[error("request_id cannot be empty")]
    EmptyRequestId,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
