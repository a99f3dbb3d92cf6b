//! Observital: transform, merge and compare database schemas
//!
//! Observital works on an in-memory schema model. It can translate a schema
//! from one database dialect to another (MySQL, PostgreSQL, MongoDB), merge
//! several schemas into one, and score how compatible two schemas are.
//!
//! The engine in [`schema`] is a set of pure functions. [`service`] wraps it
//! with request validation and a [`store`] for schemas and the
//! transformation log.

pub mod config;
pub mod error;
pub mod loader;
pub mod schema;
pub mod service;
pub mod store;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use error::{Error, Result};
pub use schema::compatibility::{check_compatibility, CompatibilityReport, Severity};
pub use schema::merger::merge;
pub use schema::transformer::{transform, SchemaTransformer};
pub use schema::typemap::{map_type, TypeMapper};
pub use schema::types::{Column, Dialect, Schema, Table, Transformation};
pub use service::SchemaService;
pub use store::{InMemoryStore, SchemaStore};

/// Initialize Observital with an optional configuration file
///
/// Loads the configuration (defaults when no path is given), sets up logging
/// and returns a service over a fresh in-memory store.
pub fn init(config_path: Option<&str>) -> Result<SchemaService<InMemoryStore>> {
    let config = match config_path {
        Some(path) => config::load_from_file(path)?,
        None => Config::default(),
    };

    utils::logging::init_logging(&config.logging)?;
    tracing::debug!(config = ?config, "Configuration loaded");

    Ok(SchemaService::new(InMemoryStore::new(), config))
}
