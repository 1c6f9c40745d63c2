mod currency;
mod date;
mod models;
mod period;
mod range;

pub use currency::CurrencyCode;
pub use date::IsoDate;
pub use models::{RateSnapshot, SymbolDirectory, TimeseriesResult};
pub use period::{Period, PeriodSpec};
pub use range::{DateRange, MAX_WINDOW_DAYS};
