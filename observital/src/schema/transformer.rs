//! Schema transformer
//!
//! This module converts a schema from its own dialect into a target dialect.

use crate::config::Config;
use crate::schema::decorator::decorate;
use crate::schema::typemap::TypeMapper;
use crate::schema::types::{Column, Dialect, Schema, Table};
use crate::utils::naming::get_transformed_schema_name;

/// Target version used when the caller does not give one
pub const DEFAULT_TARGET_VERSION: &str = "1.0";

const DEFAULT_NAME_PATTERN: &str = "{name}_{target}";

/// Transform `schema` into `target` with the built-in type tables
pub fn transform(schema: &Schema, target: &Dialect, target_version: &str) -> Schema {
    SchemaTransformer::default().transform(schema, target, target_version)
}

/// Schema transformer
#[derive(Debug, Clone)]
pub struct SchemaTransformer {
    type_mapper: TypeMapper,
    name_pattern: String,
}

impl Default for SchemaTransformer {
    fn default() -> Self {
        Self {
            type_mapper: TypeMapper::default(),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
        }
    }
}

impl SchemaTransformer {
    /// Create a new schema transformer from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            type_mapper: TypeMapper::new(&config.type_mapping),
            name_pattern: config.engine.transformed_name_pattern.clone(),
        }
    }

    /// Build the `target` dialect equivalent of `schema`
    ///
    /// The result has the same tables in the same order, each column mapped
    /// through the type mapper and each table decorated for the target. The
    /// source schema is left untouched.
    pub fn transform(&self, schema: &Schema, target: &Dialect, target_version: &str) -> Schema {
        let name = get_transformed_schema_name(&self.name_pattern, &schema.name, target.as_str());

        let mut transformed = Schema::new(&name, target_version, target.clone());
        transformed.source_type = Some(schema.dialect.clone());
        transformed.tables = schema
            .tables
            .iter()
            .map(|table| self.transform_table(table, &schema.dialect, target))
            .collect();

        transformed
    }

    fn transform_table(&self, table: &Table, source: &Dialect, target: &Dialect) -> Table {
        let mut transformed = Table::new(&table.name);
        transformed.columns = table
            .columns
            .iter()
            .map(|column| self.transform_column(column, source, target))
            .collect();

        // Mapping keeps names and nullability, so the source table decorates the same
        if let Some(extension) = decorate(table, target) {
            extension.apply_to(&mut transformed);
        }

        transformed
    }

    fn transform_column(&self, column: &Column, source: &Dialect, target: &Dialect) -> Column {
        Column {
            name: column.name.clone(),
            data_type: self.type_mapper.map_type(&column.data_type, source, target),
            nullable: column.nullable,
            default: column.default.clone(),
            original_type: Some(column.data_type.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomTypeMapping;
    use crate::schema::types::{Constraint, ConstraintKind, Index};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shop_schema() -> Schema {
        Schema::new("shop", "3.1", Dialect::MySql)
            .with_table(
                Table::new("users")
                    .with_column(Column::new("user_id", "INT").nullable(false))
                    .with_column(Column::new("email", "VARCHAR"))
                    .with_column(Column::new("created", "DATETIME").default(json!("CURRENT_TIMESTAMP"))),
            )
            .with_table(
                Table::new("orders")
                    .with_column(Column::new("total", "DECIMAL"))
                    .with_column(Column::new("flag", "TINYINT")),
            )
    }

    #[test]
    fn test_transform_metadata() {
        let source = shop_schema();
        let result = transform(&source, &Dialect::PostgreSql, "2.0");

        assert_eq!(result.name, "shop_PostgreSQL");
        assert_eq!(result.version, "2.0");
        assert_eq!(result.dialect, Dialect::PostgreSql);
        assert_eq!(result.source_type, Some(Dialect::MySql));
        assert_ne!(result.id, source.id);
        assert!(result.source_schemas.is_none());
    }

    #[test]
    fn test_transform_preserves_cardinality_and_order() {
        let source = shop_schema();
        let result = transform(&source, &Dialect::MongoDb, DEFAULT_TARGET_VERSION);

        assert_eq!(result.tables.len(), source.tables.len());
        for (before, after) in source.tables.iter().zip(&result.tables) {
            assert_eq!(before.name, after.name);
            let before_names: Vec<_> = before.columns.iter().map(|c| &c.name).collect();
            let after_names: Vec<_> = after.columns.iter().map(|c| &c.name).collect();
            assert_eq!(before_names, after_names);
        }
    }

    #[test]
    fn test_columns_are_mapped() {
        let result = transform(&shop_schema(), &Dialect::PostgreSql, "1.0");
        let users = result.table("users").unwrap();

        let user_id = users.column("user_id").unwrap();
        assert_eq!(user_id.data_type, "INTEGER");
        assert_eq!(user_id.original_type.as_deref(), Some("INT"));
        assert!(!user_id.nullable);

        let created = users.column("created").unwrap();
        assert_eq!(created.data_type, "TIMESTAMP");
        assert_eq!(created.default, Some(json!("CURRENT_TIMESTAMP")));

        let orders = result.table("orders").unwrap();
        assert_eq!(orders.column("total").unwrap().data_type, "DECIMAL");
        assert_eq!(orders.column("flag").unwrap().data_type, "SMALLINT");
    }

    #[test]
    fn test_postgres_target_gets_constraints() {
        let result = transform(&shop_schema(), &Dialect::PostgreSql, "1.0");
        let users = result.table("users").unwrap();

        assert_eq!(
            users.constraints.as_deref(),
            Some(
                &[
                    Constraint { kind: ConstraintKind::PrimaryKey, column: "user_id".to_string() },
                    Constraint { kind: ConstraintKind::NotNull, column: "user_id".to_string() },
                ][..]
            )
        );
        assert!(users.indexes.is_none());
        assert!(users.engine.is_none());
    }

    #[test]
    fn test_mongo_target_gets_indexes() {
        let result = transform(&shop_schema(), &Dialect::MongoDb, "1.0");
        let users = result.table("users").unwrap();

        assert_eq!(
            users.indexes.as_deref(),
            Some(
                &[
                    Index { field: "user_id".to_string(), unique: true },
                    Index { field: "email".to_string(), unique: true },
                ][..]
            )
        );
        assert_eq!(users.column("email").unwrap().data_type, "String");
    }

    #[test]
    fn test_mysql_target_gets_engine() {
        let mut source = shop_schema();
        source.dialect = Dialect::PostgreSql;

        let result = transform(&source, &Dialect::MySql, "1.0");
        assert!(result.tables.iter().all(|t| t.engine.as_deref() == Some("InnoDB")));
    }

    #[test]
    fn test_unknown_target_is_undecorated_pass_through() {
        let source = shop_schema();
        let result = transform(&source, &Dialect::Other("Cassandra".to_string()), "1.0");

        assert_eq!(result.name, "shop_Cassandra");
        let users = result.table("users").unwrap();
        assert_eq!(users.column("user_id").unwrap().data_type, "INT");
        assert!(users.constraints.is_none() && users.indexes.is_none() && users.engine.is_none());
    }

    #[test]
    fn test_source_is_not_mutated() {
        let source = shop_schema();
        let snapshot = source.clone();

        let _ = transform(&source, &Dialect::PostgreSql, "1.0");
        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_configured_transformer() {
        let mut config = Config::default();
        config.engine.transformed_name_pattern = "{name}-for-{target}".to_string();
        config.type_mapping.custom = Some(vec![CustomTypeMapping {
            source: Dialect::MySql,
            target: Dialect::PostgreSql,
            from: "DECIMAL".to_string(),
            to: "NUMERIC".to_string(),
        }]);

        let result = SchemaTransformer::new(&config).transform(&shop_schema(), &Dialect::PostgreSql, "1.0");

        assert_eq!(result.name, "shop-for-PostgreSQL");
        let orders = result.table("orders").unwrap();
        assert_eq!(orders.column("total").unwrap().data_type, "NUMERIC");
    }
}
