//! Request handling for Observital
//!
//! The service validates requests, resolves schema ids through the store and
//! then hands plain schemas to the engine. Every precondition the engine
//! relies on is checked here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::schema::compatibility::{check_compatibility, CompatibilityReport};
use crate::schema::merger::merge;
use crate::schema::transformer::SchemaTransformer;
use crate::schema::types::{Dialect, Schema, Table, Transformation};
use crate::store::SchemaStore;

/// Request to create a schema
///
/// Every field is optional on the wire so that missing fields can be
/// reported together instead of as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSchemaRequest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub dialect: Option<Dialect>,
    pub tables: Option<Vec<Table>>,
}

/// Request to transform a stored schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub schema_id: Option<String>,
    pub target_type: Option<Dialect>,
    pub target_version: Option<String>,
}

/// Request to merge stored schemas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub schema_ids: Option<Vec<String>>,
    pub merged_name: Option<String>,
}

/// Request to compare two stored schemas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRequest {
    pub source_schema_id: Option<String>,
    pub target_schema_id: Option<String>,
}

/// Service liveness information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Schema service over a store
pub struct SchemaService<S: SchemaStore> {
    store: S,
    config: Config,
    transformer: SchemaTransformer,
}

impl<S: SchemaStore> SchemaService<S> {
    /// Create a new schema service
    pub fn new(store: S, config: Config) -> Self {
        let transformer = SchemaTransformer::new(&config);
        Self {
            store,
            config,
            transformer,
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "Observital is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Validate and store a new schema
    pub fn create_schema(&self, request: CreateSchemaRequest) -> Result<Schema> {
        let name = present(&request.name);
        let version = present(&request.version);
        let dialect = request.dialect.filter(|d| !d.as_str().is_empty());

        let (name, version, dialect, tables) = match (name, version, dialect, request.tables) {
            (Some(name), Some(version), Some(dialect), Some(tables)) => {
                (name, version, dialect, tables)
            }
            _ => {
                tracing::warn!("Rejected schema without required fields");
                return Err(Error::ValidationError(
                    "Missing required fields: name, version, type, tables".to_string(),
                ));
            }
        };

        validate_tables(&tables)?;

        let mut schema = Schema::new(name, version, dialect);
        schema.tables = tables;

        self.store.insert_schema(schema.clone())?;
        tracing::info!(
            schema_id = %schema.id,
            name = %schema.name,
            tables = schema.tables.len(),
            "Schema created"
        );

        Ok(schema)
    }

    /// All live schemas
    pub fn list_schemas(&self) -> Result<Vec<Schema>> {
        self.store.list_schemas()
    }

    /// Look up one schema by id
    pub fn get_schema(&self, id: &str) -> Result<Schema> {
        tracing::debug!(schema_id = id, "Looking up schema");
        self.store
            .get_schema(id)?
            .ok_or_else(|| Error::NotFound("Schema not found".to_string()))
    }

    /// Remove a schema from the live collection
    ///
    /// Transformation records that embed the schema are kept.
    pub fn delete_schema(&self, id: &str) -> Result<Schema> {
        let deleted = self
            .store
            .delete_schema(id)?
            .ok_or_else(|| Error::NotFound("Schema not found".to_string()))?;

        tracing::info!(schema_id = id, "Schema deleted");
        Ok(deleted)
    }

    /// Transform a stored schema and record the transformation
    pub fn transform(&self, request: TransformRequest) -> Result<Transformation> {
        let schema_id = present(&request.schema_id);
        let target = request.target_type.filter(|d| !d.as_str().is_empty());

        let (schema_id, target) = match (schema_id, target) {
            (Some(schema_id), Some(target)) => (schema_id, target),
            _ => {
                tracing::warn!("Rejected transform without required fields");
                return Err(Error::ValidationError(
                    "Missing required fields: schemaId, targetType".to_string(),
                ));
            }
        };

        let source = self.get_schema(schema_id)?;
        let target_version = present(&request.target_version)
            .unwrap_or(self.config.engine.default_target_version.as_str())
            .to_string();

        let result = self.transformer.transform(&source, &target, &target_version);
        let transformation = Transformation::record(source, &target_version, result);

        self.store.append_transformation(transformation.clone())?;
        tracing::info!(
            schema_id,
            source_type = %transformation.source_schema.dialect,
            target_type = %target,
            target_version = %target_version,
            "Schema transformed"
        );

        Ok(transformation)
    }

    /// The transformation log
    pub fn transformations(&self) -> Result<Vec<Transformation>> {
        self.store.list_transformations()
    }

    /// Merge stored schemas and store the result
    pub fn merge(&self, request: MergeRequest) -> Result<Schema> {
        let schema_ids = match request.schema_ids {
            Some(ids) if ids.len() >= 2 => ids,
            _ => {
                tracing::warn!("Rejected merge with fewer than two schemas");
                return Err(Error::ValidationError(
                    "At least 2 schema IDs required for merging".to_string(),
                ));
            }
        };

        let mut schemas = Vec::with_capacity(schema_ids.len());
        for id in &schema_ids {
            match self.store.get_schema(id)? {
                Some(schema) => schemas.push(schema),
                None => {
                    return Err(Error::NotFound("One or more schemas not found".to_string()));
                }
            }
        }

        let merged_name = present(&request.merged_name)
            .unwrap_or(self.config.engine.merged_schema_name.as_str());
        let refs: Vec<&Schema> = schemas.iter().collect();
        let merged = merge(&refs, Some(merged_name));

        self.store.insert_schema(merged.clone())?;
        tracing::info!(
            schema_id = %merged.id,
            sources = schema_ids.len(),
            tables = merged.tables.len(),
            "Schemas merged"
        );

        Ok(merged)
    }

    /// Compare two stored schemas
    pub fn check_compatibility(&self, request: CompatibilityRequest) -> Result<CompatibilityReport> {
        let (source_id, target_id) = match (
            present(&request.source_schema_id),
            present(&request.target_schema_id),
        ) {
            (Some(source_id), Some(target_id)) => (source_id, target_id),
            _ => {
                tracing::warn!("Rejected compatibility check without required fields");
                return Err(Error::ValidationError(
                    "Missing required fields: sourceSchemaId, targetSchemaId".to_string(),
                ));
            }
        };

        let source = self.store.get_schema(source_id)?;
        let target = self.store.get_schema(target_id)?;
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            _ => return Err(Error::NotFound("One or both schemas not found".to_string())),
        };

        let report = check_compatibility(&source, &target);
        tracing::info!(
            source_id,
            target_id,
            score = report.compatibility_score,
            issues = report.summary.total_issues,
            "Compatibility checked"
        );

        Ok(report)
    }
}

/// Enforce unique table names and non-empty, unique column names
fn validate_tables(tables: &[Table]) -> Result<()> {
    let mut table_names = HashSet::new();

    for table in tables {
        if table.name.is_empty() {
            return Err(Error::ValidationError("Table name must not be empty".to_string()));
        }
        if !table_names.insert(table.name.as_str()) {
            return Err(Error::ValidationError(format!(
                "Duplicate table name: {}",
                table.name
            )));
        }

        let mut column_names = HashSet::new();
        for column in &table.columns {
            if column.name.is_empty() {
                return Err(Error::ValidationError(format!(
                    "Column name must not be empty in table {}",
                    table.name
                )));
            }
            if !column_names.insert(column.name.as_str()) {
                return Err(Error::ValidationError(format!(
                    "Duplicate column name {} in table {}",
                    column.name, table.name
                )));
            }
        }
    }

    Ok(())
}
