//! Dialect-specific table decoration
//!
//! A transformed table gets the artifacts its target dialect expects:
//! constraints for PostgreSQL, unique indexes for MongoDB and a storage
//! engine for MySQL. Column selection is name based.

use crate::schema::types::{Constraint, ConstraintKind, Dialect, Index, Table};
use crate::utils::naming::{is_email_name, is_identifier_name};

/// Storage engine attached to MySQL tables
pub const MYSQL_ENGINE: &str = "InnoDB";

/// Dialect-specific extension of a table
#[derive(Debug, Clone, PartialEq)]
pub enum TableExtension {
    Constraints(Vec<Constraint>),
    Indexes(Vec<Index>),
    Engine(String),
}

impl TableExtension {
    /// Attach this extension to a table
    pub fn apply_to(self, table: &mut Table) {
        match self {
            TableExtension::Constraints(constraints) => table.constraints = Some(constraints),
            TableExtension::Indexes(indexes) => table.indexes = Some(indexes),
            TableExtension::Engine(engine) => table.engine = Some(engine),
        }
    }
}

/// Build the extension for `table` in the `target` dialect
///
/// Returns `None` for dialects without decoration.
pub fn decorate(table: &Table, target: &Dialect) -> Option<TableExtension> {
    match target {
        Dialect::PostgreSql => Some(TableExtension::Constraints(postgres_constraints(table))),
        Dialect::MongoDb => Some(TableExtension::Indexes(mongo_indexes(table))),
        Dialect::MySql => Some(TableExtension::Engine(MYSQL_ENGINE.to_string())),
        Dialect::Unified | Dialect::Other(_) => None,
    }
}

/// PRIMARY KEY for identifier-like columns, NOT NULL for non-nullable ones
fn postgres_constraints(table: &Table) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    for column in &table.columns {
        if is_identifier_name(&column.name) {
            constraints.push(Constraint {
                kind: ConstraintKind::PrimaryKey,
                column: column.name.clone(),
            });
        }
        if !column.nullable {
            constraints.push(Constraint {
                kind: ConstraintKind::NotNull,
                column: column.name.clone(),
            });
        }
    }

    constraints
}

fn mongo_indexes(table: &Table) -> Vec<Index> {
    table
        .columns
        .iter()
        .filter(|column| is_identifier_name(&column.name) || is_email_name(&column.name))
        .map(|column| Index {
            field: column.name.clone(),
            unique: true,
        })
        .collect()
}
