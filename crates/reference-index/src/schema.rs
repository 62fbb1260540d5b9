//! Column Schema for Reference Rows

use serde::{Deserialize, Serialize};

/// Role a source column plays in a reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// The disease name column
    Disease,
    /// One of the ordered symptom columns
    Symptom,
    /// One of the ordered precaution columns
    Precaution,
    /// Not used by the index
    Ignored,
}

/// Describes which source columns hold which reference fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    /// Exact name of the disease column
    pub disease_column: String,
    /// Column name prefixes that mark symptom columns
    pub symptom_prefixes: Vec<String>,
    /// Column name prefixes that mark precaution columns
    pub precaution_prefixes: Vec<String>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            disease_column: "Disease".to_string(),
            symptom_prefixes: vec!["Symptom".to_string()],
            precaution_prefixes: vec!["Precaution".to_string()],
        }
    }
}

impl ColumnSchema {
    /// Classify a column by name.
    ///
    /// The disease column is checked first, so a disease column whose name
    /// happens to carry a symptom prefix is still treated as the disease.
    pub fn classify(&self, column: &str) -> ColumnRole {
        if column == self.disease_column {
            ColumnRole::Disease
        } else if has_prefix(column, &self.symptom_prefixes) {
            ColumnRole::Symptom
        } else if has_prefix(column, &self.precaution_prefixes) {
            ColumnRole::Precaution
        } else {
            ColumnRole::Ignored
        }
    }
}

fn has_prefix(column: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|p| !p.is_empty() && column.starts_with(p.as_str()))
}
