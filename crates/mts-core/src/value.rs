//! # Values Crossing the Column Boundary
//!
//! Write side: [`TemporalValue`], a tagged union over everything a host may
//! hand to `validate`/`stringify`. Loosely-typed host input is classified
//! into it explicitly with [`TemporalValue::classify`] instead of relying on
//! implicit coercion.
//!
//! Read side: [`ColumnText`], the accessor MySQL result values expose, and
//! [`ParsedTimestamp`], what `parse` hands back.

use std::borrow::Cow;
use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde_json::Value;

/// Sentinel text returned for content that is not a storable date.
pub const INVALID_DATE: &str = "invalid date";

/// An application value bound for a `TIMESTAMP` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalValue {
    /// SQL NULL.
    Null,
    /// A calendar value that already carries its zone offset.
    Zoned(DateTime<FixedOffset>),
    /// A bare instant.
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A date string; accepted, but a misuse smell on the write path.
    Text(String),
    /// Anything else the host passed through, rendered as JSON.
    Unsupported(String),
}

impl TemporalValue {
    /// Classify a loosely-typed host value.
    ///
    /// Integers are epoch milliseconds; floats, booleans, arrays and objects
    /// are unsupported.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(ms) => Self::EpochMillis(ms),
                None => Self::Unsupported(n.to_string()),
            },
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Renders the value as JSON, the form used in validation messages.
impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Zoned(dt) => {
                write!(f, "\"{}\"", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Instant(dt) => {
                write!(f, "\"{}\"", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::EpochMillis(ms) => write!(f, "{ms}"),
            Self::Text(s) => f.write_str(&Value::String(s.clone()).to_string()),
            Self::Unsupported(json) => f.write_str(json),
        }
    }
}

impl From<DateTime<FixedOffset>> for TemporalValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Zoned(dt)
    }
}

impl From<DateTime<Tz>> for TemporalValue {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt.fixed_offset())
    }
}

impl From<DateTime<Utc>> for TemporalValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

impl From<SystemTime> for TemporalValue {
    fn from(t: SystemTime) -> Self {
        Self::Instant(DateTime::<Utc>::from(t))
    }
}

impl From<i64> for TemporalValue {
    fn from(ms: i64) -> Self {
        Self::EpochMillis(ms)
    }
}

impl From<&str> for TemporalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TemporalValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Value> for TemporalValue {
    fn from(value: Value) -> Self {
        Self::classify(&value)
    }
}

impl<T: Into<TemporalValue>> From<Option<T>> for TemporalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A column value as returned by the driver.
///
/// `string` is called once per parse; `None` is the NULL marker.
pub trait ColumnText {
    fn string(&self) -> Option<Cow<'_, str>>;
}

impl ColumnText for str {
    fn string(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ColumnText for String {
    fn string(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: ColumnText + ?Sized> ColumnText for &T {
    fn string(&self) -> Option<Cow<'_, str>> {
        (**self).string()
    }
}

impl<T: ColumnText> ColumnText for Option<T> {
    fn string(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(ColumnText::string)
    }
}

/// Result of decoding column text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// The column held NULL.
    Null,
    /// A storable instant.
    Instant(DateTime<Utc>),
    /// The column held text that is not a storable date.
    Invalid,
}

impl ParsedTimestamp {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(*dt),
            Self::Null | Self::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for ParsedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Invalid => f.write_str(INVALID_DATE),
        }
    }
}
