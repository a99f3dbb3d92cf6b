//! Schema compatibility checker
//!
//! Compares a source schema against a target schema, table by table and
//! column by column. The comparison is source-relative: tables and columns
//! that only exist in the target are never looked at.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::types::{Schema, Table};

/// Score reported when there is nothing to compare
pub const EMPTY_COMPARISON_SCORE: u32 = 100;

/// Severity of a compatibility issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A difference between source and target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

/// A column that matches between source and target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibleItem {
    pub table: String,
    pub column: String,
    pub message: String,
}

/// Counts over a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilitySummary {
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub compatible_items: usize,
}

/// Result of a compatibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub is_compatible: bool,
    pub compatibility_score: u32,
    pub issues: Vec<Issue>,
    pub compatible: Vec<CompatibleItem>,
    pub summary: CompatibilitySummary,
}

impl CompatibilityReport {
    /// Build a report, deriving score, verdict and summary from the entries
    pub fn from_entries(issues: Vec<Issue>, compatible: Vec<CompatibleItem>) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();

        let summary = CompatibilitySummary {
            total_issues: issues.len(),
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            compatible_items: compatible.len(),
        };

        Self {
            is_compatible: summary.errors == 0,
            compatibility_score: score(compatible.len(), issues.len()),
            issues,
            compatible,
            summary,
        }
    }

    /// Issues with the given severity
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// Percentage of compatible entries, rounded half up
///
/// With no entries at all the score is [`EMPTY_COMPARISON_SCORE`].
pub fn score(compatible: usize, issues: usize) -> u32 {
    let total = compatible + issues;
    if total == 0 {
        return EMPTY_COMPARISON_SCORE;
    }

    ((200 * compatible + total) / (2 * total)) as u32
}

/// Check how well `source` fits onto `target`
pub fn check_compatibility(source: &Schema, target: &Schema) -> CompatibilityReport {
    let mut issues = Vec::new();
    let mut compatible = Vec::new();

    for source_table in &source.tables {
        match target.table(&source_table.name) {
            Some(target_table) => {
                compare_columns(source_table, target_table, &mut issues, &mut compatible)
            }
            None => issues.push(Issue {
                severity: Severity::Warning,
                table: None,
                column: None,
                message: format!(
                    "Table \"{}\" exists in source but not in target",
                    source_table.name
                ),
            }),
        }
    }

    CompatibilityReport::from_entries(issues, compatible)
}

fn compare_columns(
    source: &Table,
    target: &Table,
    issues: &mut Vec<Issue>,
    compatible: &mut Vec<CompatibleItem>,
) {
    for source_col in &source.columns {
        match target.column(&source_col.name) {
            None => issues.push(Issue {
                severity: Severity::Warning,
                table: Some(source.name.clone()),
                column: Some(source_col.name.clone()),
                message: format!(
                    "Column \"{}\" exists in source but not in target",
                    source_col.name
                ),
            }),
            Some(target_col) if target_col.data_type != source_col.data_type => {
                issues.push(Issue {
                    severity: Severity::Info,
                    table: Some(source.name.clone()),
                    column: Some(source_col.name.clone()),
                    message: format!(
                        "Type mismatch: {} vs {}",
                        source_col.data_type, target_col.data_type
                    ),
                })
            }
            Some(_) => compatible.push(CompatibleItem {
                table: source.name.clone(),
                column: source_col.name.clone(),
                message: "Compatible".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Column, Dialect};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn schema_with(tables: Vec<Table>) -> Schema {
        let mut schema = Schema::new("s", "1.0", Dialect::MySql);
        schema.tables = tables;
        schema
    }

    fn users() -> Table {
        Table::new("users")
            .with_column(Column::new("id", "INT").nullable(false))
            .with_column(Column::new("email", "VARCHAR"))
    }

    #[test]
    fn test_identical_schemas() {
        let source = schema_with(vec![users(), Table::new("orders").with_column(Column::new("total", "DECIMAL"))]);
        let target = source.clone();

        let report = check_compatibility(&source, &target);

        assert_eq!(report.compatibility_score, 100);
        assert!(report.issues.is_empty());
        assert!(report.is_compatible);
        assert_eq!(report.compatible.len(), 3);
        assert_eq!(report.summary.compatible_items, 3);
    }

    #[test]
    fn test_type_mismatch() {
        let source = schema_with(vec![Table::new("t").with_column(Column::new("x", "INT"))]);
        let target = schema_with(vec![Table::new("t").with_column(Column::new("x", "VARCHAR"))]);

        let report = check_compatibility(&source, &target);

        assert_eq!(
            report.issues,
            vec![Issue {
                severity: Severity::Info,
                table: Some("t".to_string()),
                column: Some("x".to_string()),
                message: "Type mismatch: INT vs VARCHAR".to_string(),
            }]
        );
        assert!(report.compatibility_score < 100);
        assert_eq!(report.compatibility_score, 0);
        assert!(report.is_compatible);
        assert_eq!(report.summary.infos, 1);
    }

    #[test]
    fn test_missing_table() {
        let source = schema_with(vec![users()]);
        let target = schema_with(vec![Table::new("orders")]);

        let report = check_compatibility(&source, &target);

        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.message, "Table \"users\" exists in source but not in target");
        assert!(issue.table.is_none());
        assert!(report.compatible.is_empty());
        assert_eq!(report.compatibility_score, 0);
    }

    #[test]
    fn test_missing_column() {
        let source = schema_with(vec![users()]);
        let target = schema_with(vec![Table::new("users").with_column(Column::new("id", "INT"))]);

        let report = check_compatibility(&source, &target);

        assert_eq!(report.summary.warnings, 1);
        assert_eq!(report.summary.compatible_items, 1);
        let issue = report.issues_with(Severity::Warning).next().unwrap();
        assert_eq!(issue.table.as_deref(), Some("users"));
        assert_eq!(issue.column.as_deref(), Some("email"));
        assert_eq!(report.compatibility_score, 50);
    }

    #[test]
    fn test_type_comparison_is_exact() {
        let source = schema_with(vec![Table::new("t").with_column(Column::new("x", "int"))]);
        let target = schema_with(vec![Table::new("t").with_column(Column::new("x", "INT"))]);

        assert_eq!(check_compatibility(&source, &target).summary.infos, 1);
    }

    #[test]
    fn test_target_only_objects_are_ignored() {
        let source = schema_with(vec![Table::new("users").with_column(Column::new("id", "INT"))]);
        let target = schema_with(vec![users(), Table::new("extra").with_column(Column::new("x", "INT"))]);

        let report = check_compatibility(&source, &target);

        assert!(report.issues.is_empty());
        assert_eq!(report.compatibility_score, 100);
    }

    #[test]
    fn test_nothing_to_compare() {
        let empty = schema_with(Vec::new());
        let report = check_compatibility(&empty, &schema_with(vec![users()]));

        assert_eq!(report.compatibility_score, EMPTY_COMPARISON_SCORE);
        assert!(report.is_compatible);
        assert_eq!(report.summary, CompatibilitySummary::default());

        let columnless = schema_with(vec![Table::new("users")]);
        let report = check_compatibility(&columnless, &schema_with(vec![users()]));
        assert_eq!(report.compatibility_score, EMPTY_COMPARISON_SCORE);
    }

    #[test]
    fn test_error_issue_makes_report_incompatible() {
        let report = CompatibilityReport::from_entries(
            vec![Issue {
                severity: Severity::Error,
                table: None,
                column: None,
                message: "broken".to_string(),
            }],
            Vec::new(),
        );

        assert!(!report.is_compatible);
        assert_eq!(report.summary.errors, 1);
    }

    #[rstest]
    #[case(1, 1, 50)]
    #[case(1, 2, 33)]
    #[case(2, 1, 67)]
    #[case(1, 7, 13)]
    #[case(1, 0, 100)]
    #[case(0, 3, 0)]
    #[case(0, 0, 100)]
    fn test_score_rounding(#[case] compatible: usize, #[case] issues: usize, #[case] expected: u32) {
        assert_eq!(score(compatible, issues), expected);
    }

    #[test]
    fn test_report_wire_format() {
        let source = schema_with(vec![Table::new("t").with_column(Column::new("x", "INT"))]);
        let report = check_compatibility(&source, &source.clone());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["isCompatible"], true);
        assert_eq!(value["compatibilityScore"], 100);
        assert_eq!(value["summary"]["compatibleItems"], 1);
        assert_eq!(value["summary"]["totalIssues"], 0);
    }
}
