//! Configuration handling for Observital

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{Error, Result};
use crate::schema::types::Dialect;

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Represents the complete Observital configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub type_mapping: TypeMappingConfig,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.engine.default_target_version.trim().is_empty() {
            return Err(Error::ConfigError(
                "engine.default_target_version must not be empty".to_string(),
            ));
        }

        if self.engine.merged_schema_name.trim().is_empty() {
            return Err(Error::ConfigError(
                "engine.merged_schema_name must not be empty".to_string(),
            ));
        }

        if !self.engine.transformed_name_pattern.contains("{name}") {
            return Err(Error::ConfigError(format!(
                "engine.transformed_name_pattern must contain {{name}}: {}",
                self.engine.transformed_name_pattern
            )));
        }

        for mapping in self.type_mapping.custom.iter().flatten() {
            if mapping.from.is_empty() || mapping.to.is_empty() {
                return Err(Error::ConfigError(format!(
                    "Custom type mapping {} -> {} has an empty type token",
                    mapping.source, mapping.target
                )));
            }
        }

        Ok(())
    }
}

/// Defaults applied by the service layer when a request leaves them out
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub default_target_version: String,
    pub merged_schema_name: String,
    pub transformed_name_pattern: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_target_version: "1.0".to_string(),
            merged_schema_name: "MergedSchema".to_string(),
            transformed_name_pattern: "{name}_{target}".to_string(),
        }
    }
}

/// Type mapping configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TypeMappingConfig {
    pub custom: Option<Vec<CustomTypeMapping>>,
}

/// Custom type mapping for one dialect pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomTypeMapping {
    pub source: Dialect,
    pub target: Dialect,
    pub from: String,
    pub to: String,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: "text".to_string(),
            stdout: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.engine.default_target_version, "1.0");
        assert_eq!(config.engine.merged_schema_name, "MergedSchema");
        assert!(config.type_mapping.custom.is_none());
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [engine]
            merged_schema_name = "Combined"

            [type_mapping]
            custom = [
              {{ source = "MySQL", target = "PostgreSQL", from = "DOUBLE", to = "DOUBLE PRECISION" }},
            ]

            [logging]
            level = "debug"
            format = "json"
            stdout = true
            "#
        )
        .unwrap();

        let config = load_from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.engine.merged_schema_name, "Combined");
        assert_eq!(config.engine.default_target_version, "1.0");
        let custom = config.type_mapping.custom.unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].source, Dialect::MySql);
        assert_eq!(custom[0].target, Dialect::PostgreSql);
        assert_eq!(config.logging.unwrap().level, "debug");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_from_file("/definitely/not/here/observital.toml");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_rejects_pattern_without_name() {
        let config: Config = toml::from_str(
            r#"
            [engine]
            transformed_name_pattern = "{target}"
            "#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
