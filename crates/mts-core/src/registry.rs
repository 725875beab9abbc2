//! # Type Registry
//!
//! Hosts dispatch column types by `(dialect, key)`. Instead of mutating a
//! shared namespace on load, the host owns a [`TypeRegistry`] and installs
//! the `TIMESTAMP` type through an explicit factory call,
//! [`register_timestamp`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::column::{TimestampType, DIALECT_TYPES};
use crate::config::TypeArgs;
use crate::error::{MtsError, ValidationError};
use crate::timezone::SessionOptions;
use crate::value::{ColumnText, ParsedTimestamp, TemporalValue};

/// The method surface a host invokes on a column type.
pub trait ColumnType: fmt::Debug + Send + Sync {
    /// Registry key, e.g. `"TIMESTAMP"`.
    fn key(&self) -> &'static str;

    /// Column definition fragment for DDL.
    fn to_sql(&self) -> String;

    /// Write-time type check.
    fn validate(&self, value: &TemporalValue) -> Result<bool, ValidationError>;

    /// Encode a value as column text; `None` is NULL.
    fn stringify(&self, value: &TemporalValue, options: &SessionOptions) -> Option<String>;

    /// Decode column text.
    fn parse(&self, value: &dyn ColumnText, options: &SessionOptions) -> ParsedTimestamp;
}

impl ColumnType for TimestampType {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn to_sql(&self) -> String {
        TimestampType::to_sql(self)
    }

    fn validate(&self, value: &TemporalValue) -> Result<bool, ValidationError> {
        TimestampType::validate(self, value)
    }

    fn stringify(&self, value: &TemporalValue, options: &SessionOptions) -> Option<String> {
        TimestampType::stringify(self, value, options)
    }

    fn parse(&self, value: &dyn ColumnText, options: &SessionOptions) -> ParsedTimestamp {
        TimestampType::parse(self, value, options)
    }
}

/// Column types keyed by dialect and type name.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<(String, String), Arc<dyn ColumnType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `column_type` under `(dialect, name)`, returning whatever was
    /// there before.
    pub fn register(
        &mut self,
        dialect: &str,
        name: &str,
        column_type: Arc<dyn ColumnType>,
    ) -> Option<Arc<dyn ColumnType>> {
        self.types
            .insert((dialect.to_string(), name.to_string()), column_type)
    }

    pub fn get(&self, dialect: &str, name: &str) -> Option<Arc<dyn ColumnType>> {
        self.types
            .get(&(dialect.to_string(), name.to_string()))
            .cloned()
    }

    /// Type names registered for `dialect`, in order.
    pub fn names<'a>(&'a self, dialect: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.types
            .keys()
            .filter(move |(d, _)| d == dialect)
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Build a `TIMESTAMP` type from host construction arguments and install it
/// for every dialect it serves.
pub fn register_timestamp(
    registry: &mut TypeRegistry,
    args: TypeArgs,
) -> Result<Arc<TimestampType>, MtsError> {
    let column_type = Arc::new(TimestampType::try_from(args)?);
    for (dialect, names) in DIALECT_TYPES {
        for name in names.iter() {
            registry.register(dialect, name, column_type.clone());
        }
    }
    tracing::debug!(sql = %column_type.to_sql(), "registered TIMESTAMP column type");
    Ok(column_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_timestamp_installs_mysql_entry() {
        let mut registry = TypeRegistry::new();
        let ts = register_timestamp(&mut registry, TypeArgs::Length(3)).unwrap();
        assert_eq!(ts.to_sql(), "TIMESTAMP(3) NULL");

        let found = registry.get("mysql", "TIMESTAMP").unwrap();
        assert_eq!(found.key(), "TIMESTAMP");
        assert_eq!(found.to_sql(), "TIMESTAMP(3) NULL");
        assert_eq!(registry.names("mysql").collect::<Vec<_>>(), vec!["TIMESTAMP"]);
        assert!(registry.get("postgres", "TIMESTAMP").is_none());
    }

    #[test]
    fn register_timestamp_rejects_bad_precision() {
        let mut registry = TypeRegistry::new();
        assert!(register_timestamp(&mut registry, TypeArgs::Length(10)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn re_registration_returns_previous() {
        let mut registry = TypeRegistry::new();
        register_timestamp(&mut registry, TypeArgs::default()).unwrap();
        let previous = registry.register("mysql", "TIMESTAMP", Arc::new(TimestampType::new()));
        assert_eq!(previous.map(|t| t.to_sql()), Some("TIMESTAMP NULL".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn trait_object_dispatches_to_column() {
        let column: Arc<dyn ColumnType> = Arc::new(TimestampType::new());
        let session = SessionOptions::default();
        assert_eq!(
            column.stringify(&TemporalValue::EpochMillis(1451703845000), &session).as_deref(),
            Some("2016-01-02 03:04:05")
        );
        let parsed = column.parse(&"2016-01-02 03:04:05", &session);
        assert_eq!(parsed.instant().map(|dt| dt.timestamp()), Some(1451703845));
        assert!(column.validate(&TemporalValue::from("2016-02-30")).is_err());
    }
}
