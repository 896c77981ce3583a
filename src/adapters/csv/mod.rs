//! CSV adapter: Implementation of DatasetLoader for comma-separated files.
//!
//! The header row is checked against the required schema before any cell is
//! coerced, so a misnamed column is reported as a schema problem and never
//! as a parse failure deep in the file. Row ingestion is strict: one
//! malformed value rejects the whole dataset.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::{
    TrainingRecord, TrainingTable, VitalReading, FEATURE_COLUMNS, LABEL_COLUMN, REQUIRED_COLUMNS,
};
use crate::ports::DatasetLoader;

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("dataset is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("row {row}, column {column}: {message}")]
    Data {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("dataset contains a header but no data rows")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loader for the historical-records CSV format.
///
/// Required columns (exact, case-sensitive): `Age`, `TopBP`, `BottomBP`,
/// `Sugar`, `ChestPain`, `BMI`, `Disease`. Column order in the file is
/// irrelevant; the produced table locks features to the order in
/// [`FEATURE_COLUMNS`].
#[derive(Debug, Clone, Default)]
pub struct CsvLoader;

impl CsvLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load a training table from any reader (in-memory buffers, stdin).
    ///
    /// # Errors
    /// Returns `LoadError` on schema or row problems; nothing is returned
    /// partially.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<TrainingTable, LoadError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        // Schema check comes before any type coercion.
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !headers.iter().any(|h| h == **name))
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::Schema { missing });
        }

        let position = |name: &str| {
            // Presence was just verified for every required column.
            headers
                .iter()
                .position(|h| h == name)
                .expect("required column present")
        };
        let feature_at: Vec<usize> = FEATURE_COLUMNS.iter().map(|c| position(c)).collect();
        let label_at = position(LABEL_COLUMN);

        let mut records = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            let row_no = i + 1;
            let row = row?;
            records.push(Self::parse_row(&row, row_no, &feature_at, label_at)?);
        }

        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        tracing::info!("Loaded {} training row(s) from dataset", records.len());
        Ok(TrainingTable::new(records))
    }

    fn parse_row(
        row: &StringRecord,
        row_no: usize,
        feature_at: &[usize],
        label_at: usize,
    ) -> Result<TrainingRecord, LoadError> {
        let cell = |at: usize, column: &'static str| {
            row.get(at).ok_or(LoadError::Data {
                row: row_no,
                column,
                message: "missing value".to_string(),
            })
        };
        let int = |at: usize, column: &'static str| -> Result<i64, LoadError> {
            let raw = cell(at, column)?;
            raw.parse().map_err(|_| LoadError::Data {
                row: row_no,
                column,
                message: format!("expected an integer, got \"{raw}\""),
            })
        };

        // feature_at mirrors FEATURE_COLUMNS: Age, TopBP, BottomBP, Sugar, BMI, ChestPain.
        let age = int(feature_at[0], "Age")?;
        let top_bp = int(feature_at[1], "TopBP")?;
        let bottom_bp = int(feature_at[2], "BottomBP")?;
        let sugar = int(feature_at[3], "Sugar")?;

        let raw_bmi = cell(feature_at[4], "BMI")?;
        let bmi: f64 = raw_bmi.parse().map_err(|_| LoadError::Data {
            row: row_no,
            column: "BMI",
            message: format!("expected a number, got \"{raw_bmi}\""),
        })?;

        let chest_pain = match cell(feature_at[5], "ChestPain")? {
            "Yes" => true,
            "No" => false,
            other => {
                return Err(LoadError::Data {
                    row: row_no,
                    column: "ChestPain",
                    message: format!("expected \"Yes\" or \"No\", got \"{other}\""),
                })
            }
        };

        let disease = cell(label_at, "Disease")?.to_string();
        if disease.is_empty() {
            return Err(LoadError::Data {
                row: row_no,
                column: "Disease",
                message: "empty disease label".to_string(),
            });
        }

        Ok(TrainingRecord {
            reading: VitalReading {
                age,
                top_bp,
                bottom_bp,
                sugar,
                chest_pain,
                bmi,
            },
            disease,
        })
    }
}

impl DatasetLoader for CsvLoader {
    type Error = LoadError;

    fn load(&self, path: &Path) -> Result<TrainingTable, LoadError> {
        tracing::debug!("Loading dataset from {:?}", path);
        let file = File::open(path)?;
        self.load_from_reader(BufReader::new(file))
    }
}
