use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{CurrencyCode, DateRange, IsoDate, PeriodSpec, TimeseriesResult};
use crate::error::{RateError, ValidationError};
use crate::source::{RateSource, TimeseriesRequest};

/// Stitches multi-year timeseries out of ≤365-day upstream windows.
///
/// The upstream API caps a single timeseries request to one year, so a wider
/// span is decomposed into year-aligned windows, fetched concurrently, and
/// merged into one continuous series. Each call is a stateless computation:
/// either the fully merged result is returned or the first error aborts the
/// whole request with no partial result.
pub struct TimeseriesAssembler {
    source: Arc<dyn RateSource>,
    fixed_today: Option<IsoDate>,
}

impl TimeseriesAssembler {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            fixed_today: None,
        }
    }

    /// Pin "today" to a fixed date. Relative periods are anchored to it,
    /// which keeps planning deterministic in tests.
    pub fn with_today(mut self, today: IsoDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> IsoDate {
        self.fixed_today.unwrap_or_else(IsoDate::today_utc)
    }

    /// Fetch the full requested span and merge it into one series.
    ///
    /// A single-window span is returned exactly as the upstream reported it.
    /// Multi-window spans are fetched as independent concurrent tasks; the
    /// sub-results are buffered and merged in plan order, so the output does
    /// not depend on completion order.
    pub async fn get_timeseries(
        &self,
        spec: &PeriodSpec,
        base: CurrencyCode,
        symbols: BTreeSet<CurrencyCode>,
    ) -> Result<TimeseriesResult, RateError> {
        let windows = plan_windows(spec, self.today())?;
        let mut requests = windows
            .into_iter()
            .map(|window| TimeseriesRequest::new(window, base.clone(), symbols.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        if requests.len() == 1 {
            let request = requests.remove(0);
            return self.source.timeseries(request).await;
        }

        let handles = requests
            .into_iter()
            .map(|request| {
                let source = Arc::clone(&self.source);
                tokio::spawn(async move { source.timeseries(request).await })
            })
            .collect::<Vec<_>>();

        // Buffer every sub-result before merging; awaiting in plan order
        // keeps the merge stable no matter which call finishes first.
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| RateError::transport(format!("window fetch task failed: {e}")))??;
            results.push(result);
        }

        Ok(merge_windows(results).expect("planning always yields at least one window"))
    }
}

/// Decompose a requested span into ≤365-day windows, most recent first.
///
/// Relative periods anchor on `today`; explicit pairs anchor on their end
/// date, and the oldest window's start is clamped up to the requested start
/// so the plan never overshoots it.
pub fn plan_windows(spec: &PeriodSpec, today: IsoDate) -> Result<Vec<DateRange>, ValidationError> {
    match spec {
        PeriodSpec::Relative(period) => {
            let years = period.years();
            (0..years)
                .map(|k| DateRange::new(today.years_back(k + 1), today.years_back(k)))
                .collect()
        }
        PeriodSpec::Explicit(range) => {
            let years = years_needed(range);
            if years <= 1 {
                if !range.fits_single_window() {
                    return Err(ValidationError::WindowTooLong {
                        days: range.span_days(),
                    });
                }
                return Ok(vec![*range]);
            }

            (0..years)
                .map(|k| {
                    let end = range.end.years_back(k);
                    let mut start = range.end.years_back(k + 1);
                    if k == years - 1 && start < range.start {
                        start = range.start;
                    }
                    DateRange::new(start, end)
                })
                .collect()
        }
    }
}

/// Whole windows needed to cover an explicit span; a partial trailing year
/// counts as one more window.
fn years_needed(range: &DateRange) -> i32 {
    let mut years = 1;
    while range.end.years_back(years) > range.start {
        years += 1;
    }
    years
}

/// Merge per-window series, given in most-recent-first plan order, into one.
///
/// Windows are applied oldest to newest, so at a boundary date shared by two
/// adjacent windows the newer window's rates win. The merged bounds are the
/// oldest window's reported start and the newest window's reported end.
pub fn merge_windows(windows: Vec<TimeseriesResult>) -> Option<TimeseriesResult> {
    let end_date = windows.first()?.end_date;
    let start_date = windows.last()?.start_date;

    let mut rates = std::collections::BTreeMap::new();
    for window in windows.into_iter().rev() {
        rates.extend(window.rates);
    }

    Some(TimeseriesResult {
        start_date,
        end_date,
        rates,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::Period;

    fn date(s: &str) -> IsoDate {
        IsoDate::parse(s).expect("valid date")
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).expect("valid range")
    }

    #[test]
    fn relative_period_plans_one_window_per_year() {
        let spec = PeriodSpec::Relative(Period::ThreeYears);
        let windows = plan_windows(&spec, date("2022-03-01")).expect("must plan");
        assert_eq!(
            windows,
            vec![
                range("2021-03-01", "2022-03-01"),
                range("2020-03-01", "2021-03-01"),
                range("2019-03-01", "2020-03-01"),
            ]
        );
    }

    #[test]
    fn short_explicit_pair_plans_single_unchanged_window() {
        let spec = PeriodSpec::Explicit(range("2021-06-15", "2021-09-01"));
        let windows = plan_windows(&spec, date("2022-03-01")).expect("must plan");
        assert_eq!(windows, vec![range("2021-06-15", "2021-09-01")]);
    }

    #[test]
    fn leap_day_span_is_rejected_on_the_single_window_path() {
        let spec = PeriodSpec::Explicit(range("2020-02-28", "2021-02-28"));
        let err = plan_windows(&spec, date("2022-03-01")).expect_err("must fail");
        assert_eq!(err, ValidationError::WindowTooLong { days: 366 });
    }

    #[test]
    fn explicit_pair_clamps_the_oldest_window_start() {
        let spec = PeriodSpec::Explicit(range("2019-08-15", "2022-03-01"));
        let windows = plan_windows(&spec, date("2022-03-01")).expect("must plan");
        assert_eq!(
            windows,
            vec![
                range("2021-03-01", "2022-03-01"),
                range("2020-03-01", "2021-03-01"),
                range("2019-08-15", "2020-03-01"),
            ]
        );
    }

    #[test]
    fn exact_multi_year_pair_needs_no_partial_window() {
        let spec = PeriodSpec::Explicit(range("2019-03-01", "2022-03-01"));
        let windows = plan_windows(&spec, date("2022-03-01")).expect("must plan");
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2], range("2019-03-01", "2020-03-01"));
    }

    fn series(start: &str, end: &str, rate: f64) -> TimeseriesResult {
        let mut rates = BTreeMap::new();
        let mut day = date(start);
        while day <= date(end) {
            let mut per_day = BTreeMap::new();
            per_day.insert(CurrencyCode::parse("EUR").expect("valid"), rate);
            rates.insert(day, per_day);
            day = IsoDate::from_date(day.into_inner().next_day().expect("in range"));
        }
        TimeseriesResult {
            start_date: date(start),
            end_date: date(end),
            rates,
        }
    }

    #[test]
    fn merge_takes_bounds_from_oldest_and_newest_windows() {
        let merged = merge_windows(vec![
            series("2021-03-01", "2022-03-01", 1.2),
            series("2020-03-01", "2021-03-01", 1.1),
        ])
        .expect("non-empty input");
        assert_eq!(merged.start_date, date("2020-03-01"));
        assert_eq!(merged.end_date, date("2022-03-01"));
    }

    #[test]
    fn newer_window_wins_at_the_shared_boundary_date() {
        let merged = merge_windows(vec![
            series("2021-03-01", "2022-03-01", 1.2),
            series("2020-03-01", "2021-03-01", 1.1),
        ])
        .expect("non-empty input");

        let eur = CurrencyCode::parse("EUR").expect("valid");
        let boundary = merged.rates.get(&date("2021-03-01")).expect("present");
        assert_eq!(boundary.get(&eur), Some(&1.2));
    }

    #[test]
    fn merge_covers_the_union_without_gaps() {
        let merged = merge_windows(vec![
            series("2021-03-01", "2022-03-01", 1.2),
            series("2020-03-01", "2021-03-01", 1.1),
        ])
        .expect("non-empty input");

        // 2020-03-01..2022-03-01 inclusive, boundary date counted once.
        assert_eq!(merged.rates.len(), 731);
        let mut day = merged.start_date;
        while day <= merged.end_date {
            assert!(merged.rates.contains_key(&day), "gap at {day}");
            day = IsoDate::from_date(day.into_inner().next_day().expect("in range"));
        }
    }

    #[test]
    fn merge_of_empty_plan_is_none() {
        assert!(merge_windows(Vec::new()).is_none());
    }
}
