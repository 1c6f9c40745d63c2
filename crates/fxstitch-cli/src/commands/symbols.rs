use serde_json::Value;

use fxstitch_core::{FixerClient, RateSource};

use crate::error::CliError;

pub async fn run(client: &FixerClient) -> Result<Value, CliError> {
    let directory = client.symbols().await?;
    Ok(serde_json::to_value(directory)?)
}
