//! # mts CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mts_cli::config::CliConfig;
use mts_cli::convert::{run_parse, run_stringify, run_validate, ParseArgs, StringifyArgs, ValueArgs};
use mts_cli::ddl::{run_ddl, DdlArgs};

/// MySQL TIMESTAMP column type toolkit.
///
/// Generates nullable column DDL and runs values through the column's
/// validation, encoding, and decoding under a session timezone.
#[derive(Parser, Debug)]
#[command(name = "mts", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML config file with `timezone` and `length` defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the column definition fragment.
    Ddl(DdlArgs),

    /// Check that a value is a storable date.
    Validate(ValueArgs),

    /// Encode a value as column text in the session timezone.
    Stringify(StringifyArgs),

    /// Decode column text to a UTC instant.
    Parse(ParseArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mts CLI starting");

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| {
        let mut stdout = std::io::stdout().lock();
        match &cli.command {
            Commands::Ddl(args) => run_ddl(args, &config, &mut stdout),
            Commands::Validate(args) => run_validate(args, &config, &mut stdout),
            Commands::Stringify(args) => run_stringify(args, &config, &mut stdout),
            Commands::Parse(args) => run_parse(args, &config, &mut stdout),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
