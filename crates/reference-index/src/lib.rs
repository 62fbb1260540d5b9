//! Reference Index
//!
//! Builds the in-memory disease reference used by the matcher:
//! disease → ordered symptoms and disease → ordered precautions.

mod error;
mod index;
mod loader;
mod row;
mod schema;

pub use error::IndexError;
pub use index::{BuildStats, DiseaseEntry, ReferenceIndex, ReferenceIndexBuilder};
pub use loader::{from_csv_reader, load_csv};
pub use row::{RawRow, ReferenceRow};
pub use schema::{ColumnRole, ColumnSchema};
