//! Best-months analysis over a stitched timeseries.
//!
//! For one target symbol, the daily rates are first averaged per calendar
//! month of each year, then those monthly means are averaged per month name
//! across years. The result ranks months by how favorable the rate has been
//! on average over the requested span.

use std::collections::BTreeMap;

use time::Month;

use fxstitch_core::{CurrencyCode, TimeseriesResult};

/// Average rate for one month name across the whole series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub month: Month,
    pub average: f64,
}

/// Rank months by average rate, best (highest) first.
pub fn best_months(series: &TimeseriesResult, symbol: &CurrencyCode) -> Vec<MonthlyAverage> {
    // Pass 1: mean per (year, month) so short months are not underweighted.
    let mut per_year_month: BTreeMap<(i32, u8), (f64, u32)> = BTreeMap::new();
    for (date, rates) in &series.rates {
        let Some(rate) = rates.get(symbol) else {
            continue;
        };
        let day = date.into_inner();
        let entry = per_year_month
            .entry((day.year(), day.month() as u8))
            .or_insert((0.0, 0));
        entry.0 += rate;
        entry.1 += 1;
    }

    // Pass 2: mean of the monthly means per month name.
    let mut per_month: BTreeMap<u8, (f64, u32)> = BTreeMap::new();
    for ((_, month), (sum, count)) in per_year_month {
        let entry = per_month.entry(month).or_insert((0.0, 0));
        entry.0 += sum / f64::from(count);
        entry.1 += 1;
    }

    let mut ranked = per_month
        .into_iter()
        .map(|(month, (sum, count))| MonthlyAverage {
            month: Month::try_from(month).expect("month index came from a valid date"),
            average: sum / f64::from(count),
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranked
}
