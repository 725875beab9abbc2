//! # CLI Configuration
//!
//! Session defaults loaded from an optional YAML file, overridable per
//! invocation:
//!
//! ```yaml
//! timezone: "+08:00"   # IANA zone name or (+|-)HH:MM offset
//! length: 3            # fractional-second digits, 0-6
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use mts_core::{SessionOptions, TimestampType, TypeArgs};

/// Default session timezone when neither flag nor config names one.
pub const DEFAULT_TIMEZONE: &str = "+00:00";

/// Contents of the YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub length: Option<u32>,
}

impl CliConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Session options, preferring `timezone` over the configured value.
    pub fn session(&self, timezone: Option<&str>) -> Result<SessionOptions> {
        let tz = timezone
            .or(self.timezone.as_deref())
            .unwrap_or(DEFAULT_TIMEZONE);
        SessionOptions::new(tz).with_context(|| format!("invalid session timezone {tz:?}"))
    }

    /// Column type, preferring `length` over the configured value.
    pub fn column(&self, length: Option<u32>) -> Result<TimestampType> {
        let args = TypeArgs::Options {
            length: length.or(self.length),
        };
        TimestampType::try_from(args).context("invalid column length")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.session(None).unwrap().timezone.to_string(), "+00:00");
        assert_eq!(config.column(None).unwrap().to_sql(), "TIMESTAMP NULL");
    }

    #[test]
    fn loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mts.yaml");
        std::fs::write(&path, "timezone: Australia/Perth\nlength: 3\n").unwrap();

        let config = CliConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Australia/Perth"));
        assert_eq!(config.column(None).unwrap().to_sql(), "TIMESTAMP(3) NULL");
    }

    #[test]
    fn flags_override_file() {
        let config = CliConfig {
            timezone: Some("Asia/Tokyo".into()),
            length: Some(3),
        };
        assert_eq!(config.session(Some("-08:00")).unwrap().timezone.to_string(), "-08:00");
        assert_eq!(config.column(Some(0)).unwrap().to_sql(), "TIMESTAMP NULL");
    }

    #[test]
    fn unreadable_or_invalid_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(dir.path().join("missing.yaml").as_path())).is_err());

        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "timezone: +00:00\ncolour: blue\n").unwrap();
        assert!(CliConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn bad_values_surface_with_context() {
        let config = CliConfig {
            timezone: Some("Nowhere/Special".into()),
            length: Some(9),
        };
        let err = config.session(None).unwrap_err();
        assert!(format!("{err:#}").contains("Nowhere/Special"));
        assert!(config.column(None).is_err());
    }
}
