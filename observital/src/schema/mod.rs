//! Schema module for Observital
//!
//! This module holds the schema model and the pure engine built on it:
//! type mapping, dialect decoration, transformation, merging and
//! compatibility checking.

pub mod compatibility;
pub mod decorator;
pub mod merger;
pub mod transformer;
pub mod typemap;
pub mod types;

// Re-export key types
pub use compatibility::{
    check_compatibility, CompatibilityReport, CompatibilitySummary, CompatibleItem, Issue, Severity,
};
pub use decorator::{decorate, TableExtension};
pub use merger::merge;
pub use transformer::{transform, SchemaTransformer};
pub use typemap::{map_type, TypeMapper};
pub use types::{Column, Constraint, ConstraintKind, Dialect, Index, Schema, Table, Transformation};
