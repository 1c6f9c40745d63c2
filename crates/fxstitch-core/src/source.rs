use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;

use crate::domain::{CurrencyCode, DateRange, RateSnapshot, SymbolDirectory, TimeseriesResult};
use crate::error::{RateError, ValidationError};

/// Request for a latest-rates snapshot. Construction validates arguments so
/// no remote call is ever issued for an incomplete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRequest {
    pub base: CurrencyCode,
    pub symbols: BTreeSet<CurrencyCode>,
}

impl LatestRequest {
    pub fn new(
        base: CurrencyCode,
        symbols: BTreeSet<CurrencyCode>,
    ) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbols);
        }
        Ok(Self { base, symbols })
    }
}

/// Request for a single bounded timeseries window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeseriesRequest {
    pub window: DateRange,
    pub base: CurrencyCode,
    pub symbols: BTreeSet<CurrencyCode>,
}

impl TimeseriesRequest {
    pub fn new(
        window: DateRange,
        base: CurrencyCode,
        symbols: BTreeSet<CurrencyCode>,
    ) -> Result<Self, ValidationError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbols);
        }
        // Year-aligned planner chunks may span 366 days across a leap day;
        // they still count as one fetchable window.
        if !window.fits_single_window() && !window.within_calendar_year() {
            return Err(ValidationError::WindowTooLong {
                days: window.span_days(),
            });
        }
        Ok(Self {
            window,
            base,
            symbols,
        })
    }
}

/// Read-only pricing source contract.
///
/// One implementation per upstream provider; the assembler and tests depend
/// on this trait rather than a concrete client. Pure request/response, no
/// retry or backoff: a failed call is reported as-is.
pub trait RateSource: Send + Sync {
    fn symbols<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<SymbolDirectory, RateError>> + Send + 'a>>;

    fn latest<'a>(
        &'a self,
        req: LatestRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RateSnapshot, RateError>> + Send + 'a>>;

    fn timeseries<'a>(
        &'a self,
        req: TimeseriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TimeseriesResult, RateError>> + Send + 'a>>;
}
