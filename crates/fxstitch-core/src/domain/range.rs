use serde::{Deserialize, Serialize};

use crate::domain::IsoDate;
use crate::ValidationError;

/// Upstream cap on the span of a single timeseries request.
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Inclusive date span with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: IsoDate,
    pub end: IsoDate,
}

impl DateRange {
    pub fn new(start: IsoDate, end: IsoDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::StartAfterEnd {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn span_days(&self) -> i64 {
        self.start.days_until(self.end)
    }

    /// Whether the span can be fetched in one remote call.
    pub fn fits_single_window(&self) -> bool {
        self.span_days() <= MAX_WINDOW_DAYS
    }

    /// Whether the span is at most one calendar year. A year-aligned window
    /// crossing a leap day spans 366 days but is still one upstream request.
    pub fn within_calendar_year(&self) -> bool {
        self.start >= self.end.years_back(1)
    }
}
