//! Dataset loader port: Trait for tabular training-data sources.

use std::path::Path;

use crate::domain::TrainingTable;

/// Trait for loading a labeled training table from a tabular source.
///
/// Loading is all-or-nothing: a malformed row invalidates the whole table,
/// and a failed load leaves previously trained state untouched.
pub trait DatasetLoader: Send + Sync {
    /// Error type for load operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and validate the full training table from a file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, the schema is incomplete,
    /// or any row holds a malformed value.
    fn load(&self, path: &Path) -> Result<TrainingTable, Self::Error>;
}
