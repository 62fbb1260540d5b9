//! CSV Loader for Reference Data

use crate::error::IndexError;
use crate::index::{ReferenceIndex, ReferenceIndexBuilder};
use crate::row::RawRow;
use crate::schema::ColumnSchema;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load a reference index from a headered CSV file
pub fn load_csv(path: impl AsRef<Path>, schema: &ColumnSchema) -> Result<ReferenceIndex, IndexError> {
    let path = path.as_ref();
    info!("Loading reference data from {}", path.display());
    let file = File::open(path)?;
    from_csv_reader(file, schema)
}

/// Build a reference index from any CSV byte source.
///
/// Empty cells and cells missing from short rows are treated as absent.
pub fn from_csv_reader<R: Read>(reader: R, schema: &ColumnSchema) -> Result<ReferenceIndex, IndexError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == schema.disease_column) {
        return Err(IndexError::MissingDiseaseColumn(schema.disease_column.clone()));
    }

    let mut builder = ReferenceIndexBuilder::new(schema.clone());
    for record in reader.records() {
        let record = record?;
        let raw: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = record
                    .get(i)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                (column.to_string(), value)
            })
            .collect();
        builder.push(&raw);
    }

    Ok(builder.build())
}
