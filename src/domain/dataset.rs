//! Training table types and the dataset schema.
//!
//! The schema names are exact and case-sensitive; they come from the
//! historical-records spreadsheet format the application ingests.

use std::collections::BTreeMap;

use super::vitals::VitalReading;

/// Feature columns in the order the classifier consumes them. The fitted
/// model and every later prediction present features in this exact sequence.
pub const FEATURE_COLUMNS: [&str; 6] = ["Age", "TopBP", "BottomBP", "Sugar", "BMI", "ChestPain"];

/// Number of features per row.
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Label column carrying the disease name.
pub const LABEL_COLUMN: &str = "Disease";

/// Every column a dataset must carry to be loadable.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Age",
    "TopBP",
    "BottomBP",
    "Sugar",
    "ChestPain",
    "BMI",
    "Disease",
];

/// One labeled historical record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub reading: VitalReading,
    pub disease: String,
}

impl TrainingRecord {
    /// Feature row in the locked column order.
    #[must_use]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        self.reading.to_features()
    }
}

/// A fully-validated set of training records, ready for the learner.
///
/// Row order carries no meaning; the training split shuffles anyway.
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    records: Vec<TrainingRecord>,
}

impl TrainingTable {
    #[must_use]
    pub fn new(records: Vec<TrainingRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// All feature rows, in table order.
    #[must_use]
    pub fn feature_matrix(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.records.iter().map(TrainingRecord::features).collect()
    }

    /// Encode disease labels to class indices.
    ///
    /// Returns the class vocabulary (sorted, so the encoding does not depend
    /// on row order) and one class index per row.
    #[must_use]
    pub fn encode_labels(&self) -> (Vec<String>, Vec<usize>) {
        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            let next = by_name.len();
            by_name.entry(record.disease.as_str()).or_insert(next);
        }

        // Re-number in sorted order.
        for (i, index) in by_name.values_mut().enumerate() {
            *index = i;
        }

        let classes: Vec<String> = by_name.keys().map(|name| (*name).to_string()).collect();
        let labels = self
            .records
            .iter()
            .map(|r| by_name[r.disease.as_str()])
            .collect();
        (classes, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, age: i64) -> TrainingRecord {
        TrainingRecord {
            reading: VitalReading {
                age,
                top_bp: 120,
                bottom_bp: 80,
                sugar: 100,
                chest_pain: false,
                bmi: 24.0,
            },
            disease: disease.to_string(),
        }
    }

    #[test]
    fn test_encode_labels_is_sorted_and_stable() {
        let table = TrainingTable::new(vec![
            record("Obesity", 30),
            record("Diabetes", 40),
            record("Obesity", 50),
        ]);

        let (classes, labels) = table.encode_labels();
        assert_eq!(classes, vec!["Diabetes".to_string(), "Obesity".to_string()]);
        assert_eq!(labels, vec![1, 0, 1]);

        // Row order must not change the vocabulary.
        let flipped = TrainingTable::new(vec![record("Diabetes", 40), record("Obesity", 30)]);
        let (classes2, _) = flipped.encode_labels();
        assert_eq!(classes, classes2);
    }

    #[test]
    fn test_feature_matrix_shape() {
        let table = TrainingTable::new(vec![record("Diabetes", 40), record("Obesity", 30)]);
        let matrix = table.feature_matrix();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0][0], 40.0);
    }
}
