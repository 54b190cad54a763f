//! Command-line front end for keymatch.
//!
//! Reads a JSON collection and a condition set, runs the match and renders
//! either the matching keys or the selected records.
//!
//! Usage:
//!   keymatch --data phones.json --where '{"mfr": "Motorola"}'
//!   keymatch --mode or --keys-only --where '[["==", "mfr", "Apple"], [">", "cost", 140000]]' < phones.json

pub mod args;
pub mod output;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use keymatch::json::{collection_from_json, conditions_from_json, Key};
use keymatch::{Conditions, Fields, LogicMode, Matcher, Projection};
use serde_json::{Map, Value};
use tracing::{debug, info};

pub use args::{Args, Mode, OutputFormat};
pub use output::{render, OutputError};

/// Runs one match and returns the rendered output.
///
/// `stdin` is read only when the collection path is `-`.
pub fn run<Rd: Read>(args: &Args, stdin: Rd) -> Result<String> {
    let conditions = load_conditions(args)?;
    let collection = load_collection(&args.data, stdin)?;
    let mode = LogicMode::from(args.mode);
    info!(
        records = collection.len(),
        clauses = conditions.len(),
        mode = %mode,
        "matching"
    );

    let matcher = Matcher::new(conditions).mode(mode);
    let records = collection.iter().map(|(key, record)| (key.clone(), record));

    let data = if args.keys_only {
        Value::Array(matcher.keys(records).into_iter().map(key_to_json).collect())
    } else {
        projection_to_json(matcher.filter_and_project(records, !args.keep_keys))?
    };

    render(&data, args.output).context("failed to render output")
}

fn load_conditions(args: &Args) -> Result<Conditions> {
    let (text, origin) = match (&args.filter, &args.conditions) {
        (Some(inline), _) => (inline.clone(), "--where".to_string()),
        (None, Some(path)) => (
            fs::read_to_string(path)
                .with_context(|| format!("failed to read conditions from {}", path.display()))?,
            path.display().to_string(),
        ),
        (None, None) => anyhow::bail!("no conditions given; use --where or --conditions"),
    };

    let json: Value = serde_json::from_str(&text)
        .with_context(|| format!("conditions in {origin} are not valid JSON"))?;
    let conditions = conditions_from_json(&json)
        .with_context(|| format!("invalid conditions in {origin}"))?;
    debug!(fields = ?conditions.fields(), "conditions loaded");
    Ok(conditions)
}

fn load_collection<Rd: Read>(path: &Path, mut stdin: Rd) -> Result<Vec<(Key, Fields)>> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .context("failed to read collection from stdin")?;
        text
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read collection from {}", path.display()))?
    };

    let json: Value = serde_json::from_str(&text).context("collection is not valid JSON")?;
    collection_from_json(&json).context("invalid collection")
}

fn key_to_json(key: Key) -> Value {
    match key {
        Key::Index(index) => Value::from(index),
        Key::Name(name) => Value::String(name),
    }
}

fn projection_to_json(projection: Projection<Key, &Fields>) -> Result<Value> {
    match projection {
        Projection::Reindexed(records) => Ok(Value::Array(
            records
                .into_iter()
                .map(serde_json::to_value)
                .collect::<serde_json::Result<_>>()?,
        )),
        Projection::Keyed(pairs) => {
            let mut members = Map::with_capacity(pairs.len());
            for (key, record) in pairs {
                members.insert(key.to_string(), serde_json::to_value(record)?);
            }
            Ok(Value::Object(members))
        }
    }
}
