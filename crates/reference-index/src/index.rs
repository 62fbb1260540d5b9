//! Reference Index and Builder

use crate::row::{RawRow, ReferenceRow};
use crate::schema::ColumnSchema;
use std::collections::HashMap;
use tracing::{debug, info};

/// Indexed disease entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseEntry {
    /// Lowercased, trimmed disease name
    pub key: String,
    /// Symptoms in source order
    pub symptoms: Vec<String>,
    /// Precautions in source order
    pub precautions: Vec<String>,
}

/// Row counts from an index build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows accepted into the index (including overwrites)
    pub accepted: usize,
    /// Rows dropped for lacking a disease name
    pub skipped: usize,
    /// Accepted rows that replaced an earlier row for the same disease
    pub overwritten: usize,
}

/// Immutable disease reference, iterated in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<DiseaseEntry>,
    positions: HashMap<String, usize>,
    stats: BuildStats,
}

impl ReferenceIndex {
    /// Build an index from raw rows in one pass
    pub fn from_rows<'a, I>(rows: I, schema: &ColumnSchema) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut builder = ReferenceIndexBuilder::new(schema.clone());
        for row in rows {
            builder.push(row);
        }
        builder.build()
    }

    /// Number of diseases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no diseases
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a disease by key (case and surrounding whitespace ignored)
    pub fn get(&self, disease: &str) -> Option<&DiseaseEntry> {
        let key = disease.trim().to_lowercase();
        self.positions.get(&key).map(|&i| &self.entries[i])
    }

    /// All entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &DiseaseEntry> {
        self.entries.iter()
    }

    /// The disease → symptoms mapping, in insertion order
    pub fn symptoms(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.symptoms.as_slice()))
    }

    /// The disease → precautions mapping, in insertion order
    pub fn precautions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.precautions.as_slice()))
    }

    /// Symptoms of a disease; empty when unknown
    pub fn symptoms_of(&self, disease: &str) -> &[String] {
        self.get(disease).map_or(&[], |e| e.symptoms.as_slice())
    }

    /// Precautions of a disease; empty when unknown
    pub fn precautions_of(&self, disease: &str) -> &[String] {
        self.get(disease).map_or(&[], |e| e.precautions.as_slice())
    }

    /// Counts recorded while building
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

/// Accumulates rows into a [`ReferenceIndex`]
pub struct ReferenceIndexBuilder {
    schema: ColumnSchema,
    index: ReferenceIndex,
}

impl ReferenceIndexBuilder {
    /// Create a builder for the given column schema
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            index: ReferenceIndex::default(),
        }
    }

    /// Parse and add a raw row. Returns false when the row was dropped.
    pub fn push(&mut self, raw: &RawRow) -> bool {
        match ReferenceRow::from_raw(raw, &self.schema) {
            Some(row) => {
                self.insert(row);
                true
            }
            None => {
                debug!("Dropping reference row without disease name");
                self.index.stats.skipped += 1;
                false
            }
        }
    }

    /// Add a parsed row. A repeated disease replaces the earlier entry in place.
    pub fn insert(&mut self, row: ReferenceRow) {
        let index = &mut self.index;
        index.stats.accepted += 1;

        let entry = DiseaseEntry {
            key: row.disease,
            symptoms: row.symptoms,
            precautions: row.precautions,
        };

        match index.positions.get(&entry.key) {
            Some(&pos) => {
                debug!("Overwriting reference entry for '{}'", entry.key);
                index.stats.overwritten += 1;
                index.entries[pos] = entry;
            }
            None => {
                index.positions.insert(entry.key.clone(), index.entries.len());
                index.entries.push(entry);
            }
        }
    }

    /// Finish building
    pub fn build(self) -> ReferenceIndex {
        let stats = self.index.stats;
        info!(
            diseases = self.index.len(),
            accepted = stats.accepted,
            skipped = stats.skipped,
            overwritten = stats.overwritten,
            "Reference index built"
        );
        self.index
    }
}
