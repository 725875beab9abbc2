//! # Value Subcommands
//!
//! `validate`, `stringify`, and `parse` run a single value through the
//! column type under a session timezone, mirroring what a host does on
//! write and read.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use mts_core::{TemporalValue, INVALID_DATE};

use crate::config::CliConfig;

/// Value input shared by `validate` and `stringify`.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// The value: date text, or JSON when `--json` is set
    /// (`null`, epoch milliseconds, a string, ...).
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Interpret VALUE as JSON instead of plain date text.
    #[arg(long)]
    pub json: bool,

    /// Fractional-second digits (0-6). Overrides the config file.
    #[arg(long)]
    pub length: Option<u32>,
}

impl ValueArgs {
    fn temporal_value(&self) -> Result<TemporalValue> {
        if self.json {
            let json: serde_json::Value = serde_json::from_str(&self.value)
                .with_context(|| format!("VALUE is not valid JSON: {}", self.value))?;
            Ok(TemporalValue::classify(&json))
        } else {
            Ok(TemporalValue::Text(self.value.clone()))
        }
    }
}

/// Arguments for `mts stringify`.
#[derive(Args, Debug)]
pub struct StringifyArgs {
    #[command(flatten)]
    pub value: ValueArgs,

    /// Session timezone: IANA zone or (+|-)HH:MM. Overrides the config file.
    #[arg(long)]
    pub timezone: Option<String>,
}

/// Arguments for `mts parse`.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Column text as returned by MySQL.
    #[arg(value_name = "TEXT", required_unless_present = "null")]
    pub text: Option<String>,

    /// Parse a NULL column instead of TEXT.
    #[arg(long, conflicts_with = "text")]
    pub null: bool,

    /// Session timezone: IANA zone or (+|-)HH:MM. Overrides the config file.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Fractional-second digits (0-6). Overrides the config file.
    #[arg(long)]
    pub length: Option<u32>,
}

/// Execute the validate subcommand. Exit code 1 when the value is rejected.
pub fn run_validate(args: &ValueArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let column = config.column(args.length)?;
    let value = args.temporal_value()?;
    match column.validate(&value) {
        Ok(_) => {
            writeln!(out, "OK: {value}")?;
            Ok(0)
        }
        Err(e) => {
            writeln!(out, "FAIL: {e}")?;
            Ok(1)
        }
    }
}

/// Execute the stringify subcommand. Prints `NULL` for null input.
pub fn run_stringify(args: &StringifyArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let column = config.column(args.value.length)?;
    let session = config.session(args.timezone.as_deref())?;
    let value = args.value.temporal_value()?;
    let text = column.stringify(&value, &session);
    writeln!(out, "{}", text.as_deref().unwrap_or("NULL"))?;
    Ok(if text.as_deref() == Some(INVALID_DATE) { 1 } else { 0 })
}

/// Execute the parse subcommand. Prints the instant as RFC 3339 UTC.
pub fn run_parse(args: &ParseArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let column = config.column(args.length)?;
    let session = config.session(args.timezone.as_deref())?;
    let text = if args.null { None } else { args.text.as_deref() };
    let parsed = column.parse(&text, &session);
    writeln!(out, "{parsed}")?;
    Ok(if parsed.is_invalid() { 1 } else { 0 })
}
