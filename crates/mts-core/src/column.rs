//! # The `TIMESTAMP` Column Type
//!
//! [`TimestampType`] owns the column's declared precision and implements the
//! four operations a host invokes: DDL generation, write-time validation,
//! encoding to column text, and decoding from column text.
//!
//! ## Two failure channels
//!
//! `validate` fails fast with a [`ValidationError`] because it guards
//! application input. `stringify` and `parse` see data that may already be
//! stored (possibly legacy-corrupt), so they return the `invalid date`
//! sentinel rather than aborting a whole read.

use chrono::{DateTime, Timelike, Utc};

use crate::config::{ColumnTypeConfig, TypeArgs};
use crate::error::{MtsError, ValidationError};
use crate::range::ValidRange;
use crate::text::DateText;
use crate::timezone::{SessionOptions, TimezonePolicy};
use crate::value::{ColumnText, ParsedTimestamp, TemporalValue, INVALID_DATE};

/// Column type names per SQL dialect that this type serves.
pub const DIALECT_TYPES: &[(&str, &[&str])] = &[("mysql", &["TIMESTAMP"])];

/// Wall-clock layout of MySQL `TIMESTAMP` text, before any fraction.
const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A MySQL `TIMESTAMP` column that allows NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimestampType {
    config: ColumnTypeConfig,
}

/// Outcome of reducing a write-side value to an instant.
enum Resolved {
    Null,
    Instant(DateTime<Utc>),
    Invalid,
}

impl TimestampType {
    /// Registry key.
    pub const KEY: &'static str = "TIMESTAMP";

    /// Second-granularity column.
    pub const fn new() -> Self {
        Self {
            config: ColumnTypeConfig::seconds(),
        }
    }

    /// Column storing `digits` fractional-second digits (`TIMESTAMP(n)`).
    pub fn with_length(digits: u32) -> Result<Self, MtsError> {
        Ok(Self {
            config: ColumnTypeConfig::with_length(digits)?,
        })
    }

    pub const fn from_config(config: ColumnTypeConfig) -> Self {
        Self { config }
    }

    /// A fresh instance carrying another instance's options. Hosts call this
    /// when swapping a generic type for the dialect-specific one.
    pub fn extend(other: &Self) -> Self {
        Self::from_config(other.config)
    }

    pub fn config(&self) -> ColumnTypeConfig {
        self.config
    }

    /// Construction options in the `{ length }` form.
    pub fn options(&self) -> TypeArgs {
        self.config.into()
    }

    /// DDL fragment. MySQL makes `TIMESTAMP` columns `NOT NULL` with
    /// auto-update unless told otherwise, so `NULL` is always spelled out.
    pub fn to_sql(&self) -> String {
        match self.config.precision() {
            Some(p) => format!("TIMESTAMP({}) NULL", p.digits()),
            None => "TIMESTAMP NULL".to_string(),
        }
    }

    /// Check that `value` is a real calendar date/time inside the storable
    /// range. NULL is accepted; offset-less text is read as UTC.
    pub fn validate(&self, value: &TemporalValue) -> Result<bool, ValidationError> {
        match resolve(value) {
            Resolved::Null | Resolved::Instant(_) => Ok(true),
            Resolved::Invalid => Err(ValidationError::new(format!(
                "{value} is not a valid date"
            ))),
        }
    }

    /// Encode `value` as column text in the session timezone.
    ///
    /// Returns `None` for NULL and `Some("invalid date")` for anything that
    /// does not reduce to a storable instant. Offset-less text is read as
    /// UTC, exactly as `validate` reads it, so a value that validates is
    /// never stored as the sentinel.
    pub fn stringify(&self, value: &TemporalValue, options: &SessionOptions) -> Option<String> {
        if let TemporalValue::Text(s) = value {
            tracing::warn!(
                value = %s,
                "string passed to TIMESTAMP stringify; expected a date value"
            );
        }
        match resolve(value) {
            Resolved::Null => None,
            Resolved::Instant(instant) => Some(self.format(&instant, &options.timezone)),
            Resolved::Invalid => {
                tracing::debug!(value = %value, "not a storable TIMESTAMP value");
                Some(INVALID_DATE.to_string())
            }
        }
    }

    /// Decode column text read back from MySQL.
    ///
    /// The accessor is called exactly once. Fractional digits beyond the
    /// column precision are truncated, as `stringify` truncates them.
    ///
    /// Under a named zone with daylight saving, text inside the repeated
    /// hour after clocks go back is read as the earlier of the two instants.
    /// MySQL text carries no offset, so a value stored during the second
    /// pass through that hour does not round-trip.
    pub fn parse<C>(&self, value: &C, options: &SessionOptions) -> ParsedTimestamp
    where
        C: ColumnText + ?Sized,
    {
        let Some(raw) = value.string() else {
            return ParsedTimestamp::Null;
        };
        let instant = DateText::parse(&raw)
            .and_then(|text| text.instant(&options.timezone))
            .filter(ValidRange::contains)
            .and_then(|instant| self.truncate(instant));
        match instant {
            Some(instant) => ParsedTimestamp::Instant(instant),
            None => {
                tracing::debug!(text = %raw, "unreadable TIMESTAMP column text");
                ParsedTimestamp::Invalid
            }
        }
    }

    fn truncate(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let nanos = self
            .config
            .precision()
            .map_or(0, |p| p.truncate_nanos(instant.nanosecond()));
        instant.with_nanosecond(nanos)
    }

    fn format(&self, instant: &DateTime<Utc>, policy: &TimezonePolicy) -> String {
        let wall = policy.wall_clock(instant);
        let mut out = wall.format(WALL_CLOCK_FORMAT).to_string();
        if let Some(p) = self.config.precision() {
            // Leap seconds carry nanos >= 1e9; clamp into the same second.
            let nanos = wall.nanosecond().min(999_999_999);
            let fraction = format!("{nanos:09}");
            out.push('.');
            out.push_str(&fraction[..p.digits()]);
        }
        out
    }
}

/// Reduce a write-side value to a storable instant. Offset-less text is UTC
/// wall clock on the write path.
fn resolve(value: &TemporalValue) -> Resolved {
    let instant = match value {
        TemporalValue::Null => return Resolved::Null,
        TemporalValue::Zoned(dt) => Some(dt.with_timezone(&Utc)),
        TemporalValue::Instant(dt) => Some(*dt),
        TemporalValue::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
        TemporalValue::Text(s) => {
            DateText::parse(s).and_then(|text| text.instant(&TimezonePolicy::utc()))
        }
        TemporalValue::Unsupported(_) => None,
    };
    match instant {
        Some(instant) if ValidRange::contains(&instant) => Resolved::Instant(instant),
        _ => Resolved::Invalid,
    }
}

impl TryFrom<u32> for TimestampType {
    type Error = MtsError;

    fn try_from(digits: u32) -> Result<Self, Self::Error> {
        Self::with_length(digits)
    }
}

impl TryFrom<TypeArgs> for TimestampType {
    type Error = MtsError;

    fn try_from(args: TypeArgs) -> Result<Self, Self::Error> {
        Ok(Self::from_config(ColumnTypeConfig::try_from(args)?))
    }
}

impl From<ColumnTypeConfig> for TimestampType {
    fn from(config: ColumnTypeConfig) -> Self {
        Self::from_config(config)
    }
}
