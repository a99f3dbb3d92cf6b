//! In-memory store
//!
//! Nothing is persisted; contents live as long as the process.

use std::sync::{PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::schema::types::{Schema, Transformation};
use crate::store::SchemaStore;

/// Store backed by vectors behind read/write locks
#[derive(Debug, Default)]
pub struct InMemoryStore {
    schemas: RwLock<Vec<Schema>>,
    transformations: RwLock<Vec<Transformation>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::StoreError("store lock poisoned".to_string())
}

impl SchemaStore for InMemoryStore {
    fn insert_schema(&self, schema: Schema) -> Result<()> {
        let mut schemas = self.schemas.write().map_err(poisoned)?;

        if schemas.iter().any(|s| s.id == schema.id) {
            return Err(Error::StoreError(format!(
                "Schema with id {} already exists",
                schema.id
            )));
        }

        schemas.push(schema);
        Ok(())
    }

    fn get_schema(&self, id: &str) -> Result<Option<Schema>> {
        let schemas = self.schemas.read().map_err(poisoned)?;
        Ok(schemas.iter().find(|s| s.id == id).cloned())
    }

    fn list_schemas(&self) -> Result<Vec<Schema>> {
        Ok(self.schemas.read().map_err(poisoned)?.clone())
    }

    fn delete_schema(&self, id: &str) -> Result<Option<Schema>> {
        let mut schemas = self.schemas.write().map_err(poisoned)?;

        Ok(schemas
            .iter()
            .position(|s| s.id == id)
            .map(|index| schemas.remove(index)))
    }

    fn append_transformation(&self, transformation: Transformation) -> Result<()> {
        self.transformations
            .write()
            .map_err(poisoned)?
            .push(transformation);
        Ok(())
    }

    fn list_transformations(&self) -> Result<Vec<Transformation>> {
        Ok(self.transformations.read().map_err(poisoned)?.clone())
    }
}
