//! # mts-core — MySQL `TIMESTAMP` Column Type
//!
//! A column type an ORM host can register for MySQL `TIMESTAMP` columns.
//! It fixes three things the server gets wrong for application code:
//!
//! 1. **Nullability.** MySQL makes `TIMESTAMP` columns `NOT NULL` with
//!    auto-update by default. [`TimestampType::to_sql`] always emits `NULL`.
//!
//! 2. **Timezones and precision.** Values are written as wall-clock text in
//!    the session timezone (IANA zone or fixed offset) with exactly the
//!    declared number of fractional digits, and read back to the same
//!    instant.
//!
//! 3. **Range.** The server stores signed 32-bit epoch seconds and clamps
//!    anything else. Out-of-range values are rejected by `validate` and
//!    flagged as `invalid date` by `stringify`/`parse`.
//!
//! ```
//! use mts_core::{SessionOptions, TemporalValue, TimestampType};
//!
//! let ts = TimestampType::with_length(3).unwrap();
//! let session = SessionOptions::new("+00:00").unwrap();
//! let text = ts.stringify(&TemporalValue::EpochMillis(1451703845678), &session);
//! assert_eq!(text.as_deref(), Some("2016-01-02 03:04:05.678"));
//!
//! let parsed = ts.parse("2016-01-02 03:04:05.678", &session);
//! assert_eq!(parsed.instant().map(|dt| dt.timestamp_millis()), Some(1451703845678));
//! ```
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - Every operation is a pure function of its arguments and the immutable
//!   column configuration; instances are freely shared across threads.

pub mod column;
pub mod config;
pub mod error;
pub mod range;
pub mod registry;
pub mod text;
pub mod timezone;
pub mod value;

pub use column::{TimestampType, DIALECT_TYPES};
pub use config::{ColumnTypeConfig, Precision, TypeArgs, MAX_PRECISION};
pub use error::{MtsError, ValidationError};
pub use range::ValidRange;
pub use registry::{register_timestamp, ColumnType, TypeRegistry};
pub use timezone::{SessionOptions, TimezonePolicy};
pub use value::{ColumnText, ParsedTimestamp, TemporalValue, INVALID_DATE};
