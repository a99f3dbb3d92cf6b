//! Utilities for Observital
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use logging::init_logging;
pub use naming::{contains_ignore_case, format_name, get_transformed_schema_name};
