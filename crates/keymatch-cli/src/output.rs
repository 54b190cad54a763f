//! Structured rendering of match results.
//!
//! Results are built as a `serde_json::Value` first, then written in the
//! requested format. CSV flattens an array of records into rows, using the
//! union of their fields as the header.

use serde_json::Value;
use thiserror::Error;

use crate::args::OutputFormat;

/// Errors that can occur while rendering output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),
}

/// Renders `data` in the given format. The result ends with a newline.
pub fn render(data: &Value, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(data)?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Csv => to_csv(data),
    }
}

fn to_csv(data: &Value) -> Result<String, OutputError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match data {
        Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
            let headers = headers(rows.iter().filter_map(Value::as_object));
            write_row(&mut wtr, headers.iter().map(String::as_str))?;
            for row in rows.iter().filter_map(Value::as_object) {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| row.get(h).map(cell).unwrap_or_default())
                    .collect();
                write_row(&mut wtr, cells.iter().map(String::as_str))?;
            }
        }
        Value::Array(items) => {
            write_row(&mut wtr, ["value"])?;
            for item in items {
                write_row(&mut wtr, [cell(item).as_str()])?;
            }
        }
        Value::Object(members) if members.values().all(Value::is_object) => {
            // Keyed records: the key becomes the first column
            let headers = headers(members.values().filter_map(Value::as_object));
            write_row(
                &mut wtr,
                std::iter::once("key").chain(headers.iter().map(String::as_str)),
            )?;
            for (key, row) in members {
                let mut cells = vec![key.clone()];
                cells.extend(
                    headers
                        .iter()
                        .map(|h| row.get(h).map(cell).unwrap_or_default()),
                );
                write_row(&mut wtr, cells.iter().map(String::as_str))?;
            }
        }
        Value::Object(members) => {
            write_row(&mut wtr, ["key", "value"])?;
            for (key, value) in members {
                write_row(&mut wtr, [key.as_str(), cell(value).as_str()])?;
            }
        }
        scalar => {
            write_row(&mut wtr, ["value"])?;
            write_row(&mut wtr, [cell(scalar).as_str()])?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Csv(e.to_string()))
}

fn headers<'a>(rows: impl Iterator<Item = &'a serde_json::Map<String, Value>>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for field in row.keys() {
            if !headers.contains(field) {
                headers.push(field.clone());
            }
        }
    }
    headers
}

fn write_row<'a, W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    row: impl IntoIterator<Item = &'a str>,
) -> Result<(), OutputError> {
    wtr.write_record(row)
        .map_err(|e| OutputError::Csv(e.to_string()))
}

/// Converts a JSON value to a CSV cell.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(";"),
        other => other.to_string(),
    }
}
