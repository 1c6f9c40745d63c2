use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CurrencyCode, IsoDate};

/// Available currency symbols and their long names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDirectory {
    pub symbols: BTreeMap<CurrencyCode, String>,
}

impl SymbolDirectory {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Point-in-time rates for one base currency. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub base: CurrencyCode,
    /// Upstream quote time, unix seconds.
    pub timestamp: i64,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

/// Daily rates over an inclusive date span.
///
/// `rates` holds one entry per calendar date reported by the upstream API,
/// in date order. After stitching, the map covers the full requested span
/// with no gaps and no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesResult {
    pub start_date: IsoDate,
    pub end_date: IsoDate,
    pub rates: BTreeMap<IsoDate, BTreeMap<CurrencyCode, f64>>,
}

impl TimeseriesResult {
    /// Number of calendar dates carrying rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
