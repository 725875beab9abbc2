//! # mts-cli — Command-Line Front End
//!
//! Provides the `mts` command, which runs values through the MySQL
//! `TIMESTAMP` column type without a host ORM. Useful for checking what a
//! given session timezone and column precision will write to, or read
//! back from, the server.
//!
//! ## Subcommands
//!
//! - `mts ddl` — Column definition fragment.
//! - `mts validate` — Write-time type check.
//! - `mts stringify` — Encode a value as column text.
//! - `mts parse` — Decode column text to a UTC instant.
//!
//! ```bash
//! mts ddl --length 3
//! mts stringify --timezone Australia/Perth --length 3 2016-01-02T03:04:05.678Z
//! mts parse --timezone +08:00 "2016-01-02 11:04:05"
//! mts validate --json 1481850549000
//! ```

pub mod config;
pub mod convert;
pub mod ddl;
