//! # DDL Subcommand
//!
//! Prints the column definition fragment for a `TIMESTAMP` column.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;

/// Arguments for `mts ddl`.
#[derive(Args, Debug)]
pub struct DdlArgs {
    /// Fractional-second digits (0-6). Overrides the config file.
    #[arg(long)]
    pub length: Option<u32>,
}

/// Execute the ddl subcommand.
pub fn run_ddl(args: &DdlArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let column = config.column(args.length)?;
    writeln!(out, "{}", column.to_sql())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ddl(length: Option<u32>, config: &CliConfig) -> String {
        let mut out = Vec::new();
        run_ddl(&DdlArgs { length }, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_nullable_definition() {
        assert_eq!(ddl(None, &CliConfig::default()), "TIMESTAMP NULL\n");
        assert_eq!(ddl(Some(6), &CliConfig::default()), "TIMESTAMP(6) NULL\n");
    }

    #[test]
    fn uses_configured_length() {
        let config = CliConfig {
            timezone: None,
            length: Some(3),
        };
        assert_eq!(ddl(None, &config), "TIMESTAMP(3) NULL\n");
    }

    #[test]
    fn rejects_unstorable_length() {
        let mut out = Vec::new();
        assert!(run_ddl(&DdlArgs { length: Some(7) }, &CliConfig::default(), &mut out).is_err());
    }
}
