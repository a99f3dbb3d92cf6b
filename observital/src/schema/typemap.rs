//! Column type mapping between dialects
//!
//! Mappings are keyed by the ordered `(source, target)` pair. Only a few pairs
//! have a table; for every other pair, and for tokens missing from a pair's
//! table, the type is returned unchanged.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::TypeMappingConfig;
use crate::schema::types::Dialect;

type TypeTable = HashMap<&'static str, &'static str>;

static MYSQL_TO_POSTGRES: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("INT", "INTEGER"),
        ("VARCHAR", "VARCHAR"),
        ("TEXT", "TEXT"),
        ("DATETIME", "TIMESTAMP"),
        ("TINYINT", "SMALLINT"),
    ])
});

static POSTGRES_TO_MYSQL: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("INTEGER", "INT"),
        ("VARCHAR", "VARCHAR"),
        ("TEXT", "TEXT"),
        ("TIMESTAMP", "DATETIME"),
        ("SMALLINT", "TINYINT"),
    ])
});

static MYSQL_TO_MONGO: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("INT", "Number"),
        ("VARCHAR", "String"),
        ("TEXT", "String"),
        ("DATETIME", "Date"),
        ("TINYINT", "Number"),
    ])
});

static POSTGRES_TO_MONGO: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("INTEGER", "Number"),
        ("VARCHAR", "String"),
        ("TEXT", "String"),
        ("TIMESTAMP", "Date"),
        ("SMALLINT", "Number"),
    ])
});

/// Built-in table for a dialect pair, if there is one
fn builtin_table(source: &Dialect, target: &Dialect) -> Option<&'static TypeTable> {
    match (source, target) {
        (Dialect::MySql, Dialect::PostgreSql) => Some(&*MYSQL_TO_POSTGRES),
        (Dialect::PostgreSql, Dialect::MySql) => Some(&*POSTGRES_TO_MYSQL),
        (Dialect::MySql, Dialect::MongoDb) => Some(&*MYSQL_TO_MONGO),
        (Dialect::PostgreSql, Dialect::MongoDb) => Some(&*POSTGRES_TO_MONGO),
        _ => None,
    }
}

/// Map a column type token from `source` to `target` using the built-in tables
///
/// Never fails: unknown pairs and unknown tokens pass through unchanged.
pub fn map_type(column_type: &str, source: &Dialect, target: &Dialect) -> String {
    builtin_table(source, target)
        .and_then(|table| table.get(column_type))
        .map(|mapped| mapped.to_string())
        .unwrap_or_else(|| column_type.to_string())
}

/// Type mapper that layers custom mappings over the built-in tables
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    custom: HashMap<(Dialect, Dialect), HashMap<String, String>>,
}

impl TypeMapper {
    /// Create a type mapper from configuration
    pub fn new(config: &TypeMappingConfig) -> Self {
        let mut custom: HashMap<(Dialect, Dialect), HashMap<String, String>> = HashMap::new();

        for mapping in config.custom.iter().flatten() {
            custom
                .entry((mapping.source.clone(), mapping.target.clone()))
                .or_default()
                .insert(mapping.from.clone(), mapping.to.clone());
        }

        Self { custom }
    }

    /// Map a column type token, preferring custom mappings for the pair
    pub fn map_type(&self, column_type: &str, source: &Dialect, target: &Dialect) -> String {
        if self.custom.is_empty() {
            return map_type(column_type, source, target);
        }

        self.custom
            .get(&(source.clone(), target.clone()))
            .and_then(|table| table.get(column_type))
            .cloned()
            .unwrap_or_else(|| map_type(column_type, source, target))
    }
}
