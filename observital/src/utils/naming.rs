//! Naming utilities for Observital
//!
//! This module provides helpers for building and matching schema object names.

/// Format a name according to a pattern with placeholders
pub fn format_name(pattern: &str, replacements: &[(&str, &str)]) -> String {
    let mut result = pattern.to_string();

    for (placeholder, value) in replacements {
        result = result.replace(&format!("{{{}}}", placeholder), value);
    }

    result
}

/// Get the name of a transformed schema according to pattern
pub fn get_transformed_schema_name(pattern: &str, schema_name: &str, target: &str) -> String {
    format_name(pattern, &[("name", schema_name), ("target", target)])
}

/// Case-insensitive substring test used for column name heuristics
pub fn contains_ignore_case(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a column name looks like an identifier column
pub fn is_identifier_name(name: &str) -> bool {
    contains_ignore_case(name, "id")
}

/// Whether a column name looks like an email column
pub fn is_email_name(name: &str) -> bool {
    contains_ignore_case(name, "email")
}
