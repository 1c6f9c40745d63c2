use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(data)?,
    }

    Ok(())
}

/// Flat key/value listing of the top-level object; nested payloads are
/// printed as indented JSON under their key.
fn render_table(data: &Value) -> Result<(), CliError> {
    let Some(object) = data.as_object() else {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    };

    let width = object.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in object {
        match value {
            Value::Null => println!("{key:width$} : -"),
            Value::Bool(_) | Value::Number(_) => println!("{key:width$} : {value}"),
            Value::String(text) => println!("{key:width$} : {text}"),
            Value::Array(_) | Value::Object(_) => {
                println!("{key}:");
                let nested = serde_json::to_string_pretty(value)?;
                for line in nested.lines() {
                    println!("  {line}");
                }
            }
        }
    }

    Ok(())
}
