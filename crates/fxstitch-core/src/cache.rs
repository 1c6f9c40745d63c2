//! Caller-owned memoization of stitched timeseries.
//!
//! The assembler itself is stateless and re-fetches on every call. A
//! presentation layer that repeats identical queries within a session can
//! own a [`SessionCache`] and consult it before calling the assembler.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{CurrencyCode, PeriodSpec, TimeseriesResult};

/// Identity of a timeseries query: base, targets, and the requested span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub base: CurrencyCode,
    pub symbols: BTreeSet<CurrencyCode>,
    pub spec: PeriodSpec,
}

impl SeriesKey {
    pub fn new(base: CurrencyCode, symbols: BTreeSet<CurrencyCode>, spec: PeriodSpec) -> Self {
        Self {
            base,
            symbols,
            spec,
        }
    }
}

/// Session-scoped store of merged results keyed by [`SeriesKey`].
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<SeriesKey, TimeseriesResult>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&TimeseriesResult> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: SeriesKey, result: TimeseriesResult) {
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
