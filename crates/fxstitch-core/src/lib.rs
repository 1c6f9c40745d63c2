//! Core contracts for fxstitch.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The authenticated Fixer API client
//! - The multi-year timeseries assembler and its window planner
//! - A caller-owned session cache for stitched results

pub mod assembler;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixer;
pub mod http_client;
pub mod source;

pub use assembler::{merge_windows, plan_windows, TimeseriesAssembler};
pub use cache::{SeriesKey, SessionCache};
pub use config::{Config, ConfigError, API_KEY_ENV};
pub use domain::{
    CurrencyCode, DateRange, IsoDate, Period, PeriodSpec, RateSnapshot, SymbolDirectory,
    TimeseriesResult, MAX_WINDOW_DAYS,
};
pub use error::{RateError, ValidationError};
pub use fixer::{FixerClient, FIXER_BASE_URL};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
    DEFAULT_TIMEOUT_MS,
};
pub use source::{LatestRequest, RateSource, TimeseriesRequest};
