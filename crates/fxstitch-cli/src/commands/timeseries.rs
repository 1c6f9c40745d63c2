use std::sync::Arc;

use serde_json::{json, Map, Value};

use fxstitch_core::{
    CurrencyCode, FixerClient, IsoDate, Period, PeriodSpec, TimeseriesAssembler,
};

use crate::analytics;
use crate::cli::TimeseriesArgs;
use crate::error::CliError;

pub async fn run(client: FixerClient, args: &TimeseriesArgs) -> Result<Value, CliError> {
    let base = CurrencyCode::parse(&args.base)?;
    let symbols = super::parse_symbols(&args.symbols)?;

    let period = args
        .period
        .as_deref()
        .map(str::parse::<Period>)
        .transpose()?;
    let start = args
        .start
        .as_deref()
        .map(IsoDate::parse)
        .transpose()?;
    let end = args.end.as_deref().map(IsoDate::parse).transpose()?;

    // The period wins over explicit dates; say so instead of silently
    // dropping the caller's input.
    if period.is_some() && (start.is_some() || end.is_some()) {
        eprintln!("warning: both a period and explicit dates were given; using the period");
    }

    let spec = PeriodSpec::from_parts(period, start, end)?;

    let assembler = TimeseriesAssembler::new(Arc::new(client));
    let series = assembler
        .get_timeseries(&spec, base, symbols.clone())
        .await?;

    let mut data = match serde_json::to_value(&series)? {
        Value::Object(object) => object,
        other => {
            let mut object = Map::new();
            object.insert(String::from("series"), other);
            object
        }
    };

    if args.best_months {
        let mut rankings = Map::new();
        for symbol in &symbols {
            let ranked = analytics::best_months(&series, symbol)
                .into_iter()
                .map(|entry| {
                    json!({
                        "month": entry.month.to_string(),
                        "average_rate": entry.average,
                    })
                })
                .collect::<Vec<_>>();
            rankings.insert(symbol.as_str().to_owned(), Value::Array(ranked));
        }
        data.insert(String::from("best_months"), Value::Object(rankings));
    }

    Ok(Value::Object(data))
}
