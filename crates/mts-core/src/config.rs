//! # Column Configuration
//!
//! The only thing a `TIMESTAMP` column declares is its fractional-second
//! precision (`TIMESTAMP(n)`). Hosts pass it either as a bare integer or as
//! an options object `{ "length": n }`; both deserialize through
//! [`TypeArgs`].

use serde::{Deserialize, Serialize};

use crate::error::MtsError;

/// Largest fractional-second precision MySQL accepts.
pub const MAX_PRECISION: u32 = 6;

/// Number of fractional-second digits stored by the column (1..=6).
///
/// Zero is not representable; a zero length means "no fractional part" and
/// is carried as `None` in [`ColumnTypeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Precision(u8);

impl Precision {
    /// Validate a digit count. Returns `Ok(None)` for zero.
    pub fn new(digits: u32) -> Result<Option<Self>, MtsError> {
        match digits {
            0 => Ok(None),
            1..=MAX_PRECISION => Ok(Some(Self(digits as u8))),
            _ => Err(MtsError::InvalidPrecision(digits)),
        }
    }

    /// Digit count.
    pub fn digits(self) -> usize {
        usize::from(self.0)
    }

    /// Truncate a nanosecond component to this many digits, keeping the
    /// result in nanoseconds.
    pub fn truncate_nanos(self, nanos: u32) -> u32 {
        let unit = 10u32.pow(9 - u32::from(self.0));
        nanos - nanos % unit
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> Self {
        u32::from(p.0)
    }
}

/// Immutable per-column configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnTypeConfig {
    length: Option<Precision>,
}

impl ColumnTypeConfig {
    /// Second-granularity column.
    pub const fn seconds() -> Self {
        Self { length: None }
    }

    /// Column with `digits` fractional-second digits.
    pub fn with_length(digits: u32) -> Result<Self, MtsError> {
        Ok(Self {
            length: Precision::new(digits)?,
        })
    }

    pub fn precision(&self) -> Option<Precision> {
        self.length
    }
}

/// Construction arguments as a host hands them over.
///
/// ```
/// use mts_core::TypeArgs;
///
/// let bare: TypeArgs = serde_json::from_str("3").unwrap();
/// let object: TypeArgs = serde_json::from_str(r#"{"length": 3}"#).unwrap();
/// assert_eq!(bare.length(), object.length());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeArgs {
    /// `TIMESTAMP(3)` style: the precision alone.
    Length(u32),
    /// `{ length: 3 }` style options object.
    Options {
        #[serde(default)]
        length: Option<u32>,
    },
}

impl TypeArgs {
    pub fn length(&self) -> Option<u32> {
        match self {
            Self::Length(n) => Some(*n),
            Self::Options { length } => *length,
        }
    }
}

impl Default for TypeArgs {
    fn default() -> Self {
        Self::Options { length: None }
    }
}

impl TryFrom<TypeArgs> for ColumnTypeConfig {
    type Error = MtsError;

    fn try_from(args: TypeArgs) -> Result<Self, Self::Error> {
        match args.length() {
            Some(n) => Self::with_length(n),
            None => Ok(Self::seconds()),
        }
    }
}

impl From<ColumnTypeConfig> for TypeArgs {
    fn from(config: ColumnTypeConfig) -> Self {
        Self::Options {
            length: config.length.map(u32::from),
        }
    }
}
