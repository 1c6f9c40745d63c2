use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use fxstitch_core::{CurrencyCode, FixerClient, LatestRequest, RateSource};

use crate::cli::LatestArgs;
use crate::error::CliError;

pub async fn run(client: &FixerClient, args: &LatestArgs) -> Result<Value, CliError> {
    let base = CurrencyCode::parse(&args.base)?;
    let symbols = super::parse_symbols(&args.symbols)?;

    let request = LatestRequest::new(base, symbols)?;
    let snapshot = client.latest(request).await?;

    let mut data = serde_json::to_value(&snapshot)?;
    if let Some(object) = data.as_object_mut() {
        object.insert(
            String::from("as_of"),
            json!(format_timestamp(snapshot.timestamp)),
        );
    }
    Ok(data)
}

/// Human-readable quote time alongside the raw unix timestamp.
fn format_timestamp(timestamp: i64) -> String {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| timestamp.to_string())
}
