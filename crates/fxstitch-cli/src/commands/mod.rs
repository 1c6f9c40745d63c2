mod latest;
mod symbols;
mod timeseries;

use std::collections::BTreeSet;

use serde_json::Value;

use fxstitch_core::{Config, CurrencyCode, FixerClient, ValidationError};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let client = build_client(cli)?;

    match &cli.command {
        Command::Symbols => symbols::run(&client).await,
        Command::Latest(args) => latest::run(&client, args).await,
        Command::Timeseries(args) => timeseries::run(client, args).await,
    }
}

/// Credential precedence: --api-key flag, then config file, then env var.
fn build_client(cli: &Cli) -> Result<FixerClient, CliError> {
    let mut config = if let Some(api_key) = &cli.api_key {
        Config::new(api_key.as_str())
    } else if let Some(path) = &cli.config {
        Config::from_json_file(path)?
    } else {
        Config::from_env()?
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    Ok(FixerClient::from_config(&config))
}

pub(crate) fn parse_symbols(raw: &[String]) -> Result<BTreeSet<CurrencyCode>, ValidationError> {
    raw.iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| CurrencyCode::parse(s))
        .collect()
}
