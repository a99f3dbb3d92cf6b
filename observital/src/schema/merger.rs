//! Schema merger
//!
//! Unions the tables of several schemas into one. Tables are matched by name
//! and their columns unioned by name; the first occurrence of a column wins
//! and no type conflicts are reported here.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::schema::types::{Dialect, Schema, Table};

/// Name given to a merged schema when the caller does not supply one
pub const DEFAULT_MERGED_NAME: &str = "MergedSchema";

/// Version of every merged schema
pub const MERGED_VERSION: &str = "1.0";

/// Merge `schemas` in the order given into a new `Unified` schema
///
/// Callers are expected to pass at least two schemas; fewer still produce a
/// well-formed result.
pub fn merge(schemas: &[&Schema], merged_name: Option<&str>) -> Schema {
    let mut tables: IndexMap<&str, Table> = IndexMap::new();

    for schema in schemas {
        for table in &schema.tables {
            match tables.entry(table.name.as_str()) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    let new_columns: Vec<_> = table
                        .columns
                        .iter()
                        .filter(|column| !existing.has_column(&column.name))
                        .cloned()
                        .collect();
                    existing.columns.extend(new_columns);
                }
                Entry::Vacant(entry) => {
                    entry.insert(table.clone());
                }
            }
        }
    }

    let mut merged = Schema::new(
        merged_name.unwrap_or(DEFAULT_MERGED_NAME),
        MERGED_VERSION,
        Dialect::Unified,
    );
    merged.tables = tables.into_values().collect();
    merged.source_schemas = Some(schemas.iter().map(|schema| schema.id.clone()).collect());

    merged
}
