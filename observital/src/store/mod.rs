//! Store module for Observital
//!
//! This module holds the live schema collection and the transformation log.
//! The engine never touches the store; the service layer owns it.

pub mod memory;

use crate::error::Result;
use crate::schema::types::{Schema, Transformation};

// Re-export key types
pub use memory::InMemoryStore;

/// Storage for schemas and the append-only transformation log
pub trait SchemaStore: Send + Sync {
    /// Add a schema to the live collection
    fn insert_schema(&self, schema: Schema) -> Result<()>;

    /// Look up a schema by id
    fn get_schema(&self, id: &str) -> Result<Option<Schema>>;

    /// All live schemas in insertion order
    fn list_schemas(&self) -> Result<Vec<Schema>>;

    /// Remove a schema from the live collection, returning it if it existed
    fn delete_schema(&self, id: &str) -> Result<Option<Schema>>;

    /// Append a transformation record to the log
    fn append_transformation(&self, transformation: Transformation) -> Result<()>;

    /// The transformation log in append order
    fn list_transformations(&self) -> Result<Vec<Transformation>>;
}
