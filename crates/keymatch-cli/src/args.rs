//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use keymatch::LogicMode;

#[derive(Parser, Debug)]
#[command(name = "keymatch")]
#[command(about = "Select records from a JSON collection by field conditions")]
#[command(group(ArgGroup::new("condition-source").required(true).args(["filter", "conditions"])))]
pub struct Args {
    /// JSON collection to search: an array or object of records (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    pub data: PathBuf,

    /// Inline conditions: `{"field": value}` or `[["op", "field", value], ...]`
    #[arg(short = 'w', long = "where", value_name = "JSON")]
    pub filter: Option<String>,

    /// File holding the conditions, in either form
    #[arg(short, long, value_name = "FILE")]
    pub conditions: Option<PathBuf>,

    /// How conditions combine
    #[arg(short, long, value_enum, default_value_t = Mode::And)]
    pub mode: Mode,

    /// Print the matching keys instead of the records
    #[arg(short, long, conflicts_with = "keep_keys")]
    pub keys_only: bool,

    /// Keep each record's key next to it instead of reindexing
    #[arg(long)]
    pub keep_keys: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Logic mode as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every condition must hold
    #[default]
    And,
    /// At least one condition must hold
    Or,
}

impl From<Mode> for LogicMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::And => LogicMode::And,
            Mode::Or => LogicMode::Or,
        }
    }
}

/// Structured output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
    /// CSV, one row per record
    Csv,
}
