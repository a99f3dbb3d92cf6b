//! Type definitions for schema objects
//!
//! Field names serialize in camelCase so that documents produced here can be
//! exchanged with existing JSON clients unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a fresh unique identifier for schemas and transformations
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A database family with its own column type vocabulary
///
/// Tags that are not one of the known families are kept verbatim in
/// [`Dialect::Other`] so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dialect {
    MySql,
    PostgreSql,
    MongoDb,
    /// Tag given to merged schemas
    Unified,
    Other(String),
}

impl Dialect {
    /// The canonical tag for this dialect
    pub fn as_str(&self) -> &str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MongoDb => "MongoDB",
            Dialect::Unified => "Unified",
            Dialect::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Dialect {
    fn from(tag: &str) -> Self {
        match tag {
            "MySQL" => Dialect::MySql,
            "PostgreSQL" => Dialect::PostgreSql,
            "MongoDB" => Dialect::MongoDb,
            "Unified" => Dialect::Unified,
            other => Dialect::Other(other.to_string()),
        }
    }
}

impl From<String> for Dialect {
    fn from(tag: String) -> Self {
        Dialect::from(tag.as_str())
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Dialect {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Dialect::from(s))
    }
}

fn default_nullable() -> bool {
    true
}

/// Represents a table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Type token before the column went through a transformation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_type: Option<String>,
}

impl Column {
    /// Create a new nullable column with the given name and type
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable: true,
            default: None,
            original_type: None,
        }
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set a default value for the column
    pub fn default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Kind of a generated relational constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
    #[serde(rename = "NOT NULL")]
    NotNull,
}

/// A constraint on a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub column: String,
}

/// An index on a single document field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub field: String,
    pub unique: bool,
}

/// Represents a table
///
/// `constraints`, `indexes` and `engine` are only ever filled in by a
/// transformation, depending on the target dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<Constraint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<Index>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

impl Table {
    /// Create a new table with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            constraints: None,
            indexes: None,
            engine: None,
        }
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Builder form of [`Table::add_column`]
    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Represents a complete schema in one dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub dialect: Dialect,
    pub tables: Vec<Table>,
    pub created_at: DateTime<Utc>,
    /// Dialect the schema was transformed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<Dialect>,
    /// Ids of the schemas a merged schema was built from, in merge order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_schemas: Option<Vec<String>>,
}

impl Schema {
    /// Create a new empty schema with a fresh id and creation time
    pub fn new(name: &str, version: &str, dialect: Dialect) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            version: version.to_string(),
            dialect,
            tables: Vec::new(),
            created_at: Utc::now(),
            source_type: None,
            source_schemas: None,
        }
    }

    /// Add a table to the schema
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Builder form of [`Schema::add_table`]
    pub fn with_table(mut self, table: Table) -> Self {
        self.add_table(table);
        self
    }

    /// Find a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

/// Audit record of one transformation, never modified after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    pub id: String,
    pub source_schema: Schema,
    pub target_type: Dialect,
    pub target_version: String,
    pub result: Schema,
    pub timestamp: DateTime<Utc>,
}

impl Transformation {
    /// Record a transformation of `source_schema` into `result`
    pub fn record(source_schema: Schema, target_version: &str, result: Schema) -> Self {
        Self {
            id: new_id(),
            target_type: result.dialect.clone(),
            target_version: target_version.to_string(),
            source_schema,
            result,
            timestamp: Utc::now(),
        }
    }
}
