//! Schema definition files
//!
//! Definitions are read as JSON, YAML or TOML depending on the file
//! extension and come back as create requests, so they go through the same
//! validation as any other new schema.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::service::CreateSchemaRequest;

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
    Toml,
}

impl DefinitionFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(DefinitionFormat::Json),
            Some("yaml") | Some("yml") => Ok(DefinitionFormat::Yaml),
            Some("toml") => Ok(DefinitionFormat::Toml),
            _ => Err(Error::ValidationError(format!(
                "Unsupported schema file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Parse a schema definition from text
pub fn parse_definition(content: &str, format: DefinitionFormat) -> Result<CreateSchemaRequest> {
    let request: CreateSchemaRequest = match format {
        DefinitionFormat::Json => serde_json::from_str(content)?,
        DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
        DefinitionFormat::Toml => toml::from_str(content)
            .map_err(|e| Error::SerializationError(e.to_string()))?,
    };

    Ok(request)
}

/// Read a schema definition file
pub fn load_definition(path: &Path) -> Result<CreateSchemaRequest> {
    let format = DefinitionFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;

    tracing::debug!(path = %path.display(), ?format, "Loading schema definition");
    parse_definition(&content, format)
}
