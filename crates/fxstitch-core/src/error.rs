use thiserror::Error;

/// Argument validation failures raised before any remote call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("at least one target symbol is required")]
    EmptySymbols,

    #[error("invalid period '{value}', expected one of 1y, 2y, 3y, 5y")]
    InvalidPeriod { value: String },

    #[error("date must follow YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: String, end: String },

    #[error("window spans {days} days, upstream allows at most 365")]
    WindowTooLong { days: i64 },

    #[error("either a period or both start and end dates are required")]
    MissingSpan,
}

/// Top-level error type for client and assembler operations.
///
/// `Validation` covers caller mistakes and is raised without touching the
/// network; the remaining variants classify remote failures. The assembler
/// performs no recovery: the first error from any sub-call aborts the whole
/// request and propagates unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("upstream returned status {status}")]
    Upstream { status: u16 },

    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("malformed upstream payload: {message}")]
    Decode { message: String },
}

impl RateError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this error was raised locally, before any remote call.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
