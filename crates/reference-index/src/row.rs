//! Raw and Parsed Reference Rows

use crate::schema::{ColumnRole, ColumnSchema};

/// One source row as delivered by a loader, columns in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, Option<String>)>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, builder style
    pub fn with(mut self, column: &str, value: Option<&str>) -> Self {
        self.push(column, value.map(str::to_string));
        self
    }

    /// Append a cell
    pub fn push(&mut self, column: &str, value: Option<String>) {
        self.cells.push((column.to_string(), value));
    }

    /// Value of the first cell with the given column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Iterate over cells in source order
    pub fn cells(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

impl FromIterator<(String, Option<String>)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// A disease with its ordered symptoms and precautions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    /// Disease name, lowercased and trimmed
    pub disease: String,
    /// Symptoms in column order
    pub symptoms: Vec<String>,
    /// Precautions in column order
    pub precautions: Vec<String>,
}

impl ReferenceRow {
    /// Parse a raw row against a schema.
    ///
    /// Returns `None` when the disease cell is absent or blank. Symptom and
    /// precaution values are trimmed; blank values count as absent.
    pub fn from_raw(raw: &RawRow, schema: &ColumnSchema) -> Option<Self> {
        let disease = raw
            .get(&schema.disease_column)
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())?;

        let mut symptoms = Vec::new();
        let mut precautions = Vec::new();

        for (column, value) in raw.cells() {
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            match schema.classify(column) {
                ColumnRole::Symptom => symptoms.push(value.to_string()),
                ColumnRole::Precaution => precautions.push(value.to_string()),
                ColumnRole::Disease | ColumnRole::Ignored => {}
            }
        }

        Some(Self {
            disease,
            symptoms,
            precautions,
        })
    }
}
