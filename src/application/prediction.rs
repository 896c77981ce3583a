//! Prediction service: Orchestrates the vitals → report pipeline.
//!
//! This service coordinates:
//! - Dataset loading
//! - Model training with a held-out accuracy estimate
//! - Input validation
//! - Severity scoring and advice lookup
//!
//! # Model Slot
//!
//! Exactly one trained model is live at a time. `train` builds the
//! replacement completely before publishing it with a single `Arc` swap, so
//! concurrent readers observe either the fully-old or fully-new model and
//! never a mix. A failed load or train leaves the previous model in place.

use std::path::Path;
use std::sync::{Arc, RwLock};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{
    care_plan, HealthReport, SeverityTier, TrainingTable, VitalReading, FEATURE_COUNT,
};
use crate::ports::{Classifier, DatasetLoader, FittedClassifier, TrainError};
use crate::VitalsenseError;

/// Split and reproducibility settings.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Seed for the shuffle-split and the learner's own draws.
    pub seed: u64,

    /// Minimum viable table size; anything smaller cannot be split.
    pub min_rows: usize,

    /// Holdout share denominator (5 → one fifth of rows held out).
    pub holdout_denominator: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_rows: 5,
            holdout_denominator: 5,
        }
    }
}

impl TrainingConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - VITALSENSE_SEED
    #[must_use]
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("VITALSENSE_SEED") {
            if let Ok(x) = v.trim().parse::<u64>() {
                cfg.seed = x;
            }
        }

        cfg
    }
}

/// A fitted classifier published for prediction, plus the statistics fixed
/// at training time. Immutable once built; replacement is a whole-value
/// swap in the service's model slot.
pub struct TrainedModel<M> {
    fitted: M,
    classes: Vec<String>,
    holdout_accuracy: f64,
    trained_at: chrono::DateTime<chrono::Utc>,
}

impl<M: FittedClassifier> TrainedModel<M> {
    /// Fraction of holdout rows predicted correctly, in `0..=1`.
    #[must_use]
    pub fn holdout_accuracy(&self) -> f64 {
        self.holdout_accuracy
    }

    /// When this model finished training.
    #[must_use]
    pub fn trained_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.trained_at
    }

    /// Disease labels the model can emit.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_label(&self, features: &[f64; FEATURE_COUNT]) -> &str {
        let class = self.fitted.predict(features);
        // A fitted model only emits class indices from its own vocabulary;
        // anything else is a corrupted model, not a recoverable error.
        &self.classes[class]
    }
}

/// Service for training and serving the disease classifier.
pub struct PredictionService<C, L>
where
    C: Classifier,
    L: DatasetLoader,
{
    classifier: Arc<C>,
    loader: Arc<L>,
    config: TrainingConfig,
    model: RwLock<Option<Arc<TrainedModel<C::Fitted>>>>,
}

impl<C, L> PredictionService<C, L>
where
    C: Classifier,
    L: DatasetLoader,
    L::Error: Into<crate::adapters::LoadError>,
{
    /// Create a new prediction service with environment-derived settings.
    pub fn new(classifier: Arc<C>, loader: Arc<L>) -> Self {
        Self::with_config(classifier, loader, TrainingConfig::from_env_or_default())
    }

    /// Create a new prediction service with explicit settings.
    pub fn with_config(classifier: Arc<C>, loader: Arc<L>, config: TrainingConfig) -> Self {
        Self {
            classifier,
            loader,
            config,
            model: RwLock::new(None),
        }
    }

    /// Load and validate a training table from a file.
    ///
    /// # Errors
    /// Returns error if the file is unreadable, its schema is incomplete,
    /// or any row is malformed. The current model is unaffected.
    pub fn load_dataset(&self, path: &Path) -> Result<TrainingTable, VitalsenseError> {
        self.loader
            .load(path)
            .map_err(|e| VitalsenseError::Load(e.into()))
    }

    /// Whether a trained model is available to serve predictions.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current_model().is_some()
    }

    /// Holdout accuracy of the live model, if any.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.current_model().map(|m| m.holdout_accuracy())
    }

    /// Snapshot of the live model.
    #[must_use]
    pub fn current_model(&self) -> Option<Arc<TrainedModel<C::Fitted>>> {
        self.model
            .read()
            .expect("model slot lock poisoned")
            .clone()
    }

    /// Train a new model and publish it, replacing any previous model.
    ///
    /// The table is shuffle-split 80/20 with the configured seed; the model
    /// is fitted on the training split only, and its accuracy is measured
    /// once on the untouched holdout before the swap.
    ///
    /// # Errors
    /// Returns error if the table is too small or carries fewer than two
    /// distinct disease labels. The previous model stays live on failure.
    pub fn train(&self, table: &TrainingTable) -> Result<f64, VitalsenseError> {
        let rows = table.len();
        if rows < self.config.min_rows {
            return Err(TrainError::InsufficientData {
                rows,
                min: self.config.min_rows,
            }
            .into());
        }

        let (classes, labels) = table.encode_labels();
        if classes.len() < 2 {
            return Err(TrainError::TooFewClasses {
                found: classes.len(),
            }
            .into());
        }

        let features = table.feature_matrix();

        // Deterministic shuffle-split; holdout rows never reach the learner.
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.seed);
        let mut order: Vec<usize> = (0..rows).collect();
        order.shuffle(&mut rng);
        let holdout_len = (rows / self.config.holdout_denominator).max(1);
        let (holdout_idx, train_idx) = order.split_at(holdout_len);

        let train_x: Vec<[f64; FEATURE_COUNT]> = train_idx.iter().map(|&i| features[i]).collect();
        let train_y: Vec<usize> = train_idx.iter().map(|&i| labels[i]).collect();

        let fitted = self.classifier.fit(&train_x, &train_y, rng.gen())?;

        let hits = holdout_idx
            .iter()
            .filter(|&&i| fitted.predict(&features[i]) == labels[i])
            .count();
        let holdout_accuracy = hits as f64 / holdout_len as f64;

        tracing::info!(
            "Training complete: {} row(s), {} class(es), holdout accuracy {:.2}%",
            rows,
            classes.len(),
            holdout_accuracy * 100.0
        );

        let model = Arc::new(TrainedModel {
            fitted,
            classes,
            holdout_accuracy,
            trained_at: chrono::Utc::now(),
        });
        *self.model.write().expect("model slot lock poisoned") = Some(model);

        Ok(holdout_accuracy)
    }

    /// Load a dataset and train in one step.
    ///
    /// # Errors
    /// Returns error if either step fails; the previous model stays live.
    pub fn train_from_path(&self, path: &Path) -> Result<f64, VitalsenseError> {
        let table = self.load_dataset(path)?;
        self.train(&table)
    }

    /// Check a reading against the input ranges.
    ///
    /// Returns the first violated rule's message, or `None` when the
    /// reading is acceptable.
    #[must_use]
    pub fn validate_reading(&self, reading: &VitalReading) -> Option<String> {
        reading.validate().err().map(|e| e.to_string())
    }

    /// Run the full pipeline for one reading:
    /// validate → predict → severity → advice.
    ///
    /// # Errors
    /// Returns `Validation` for out-of-range input and `NotReady` when no
    /// model has been trained yet.
    pub fn predict(&self, reading: &VitalReading) -> Result<HealthReport, VitalsenseError> {
        reading.validate()?;

        let model = self.current_model().ok_or(VitalsenseError::NotReady)?;
        let disease = model.predict_label(&reading.to_features()).to_string();
        let severity = SeverityTier::of(reading);
        let plan = care_plan(&disease, severity);

        tracing::debug!(
            "Prediction: disease={}, severity={}, accuracy={:.2}%",
            disease,
            severity,
            model.holdout_accuracy() * 100.0
        );

        Ok(HealthReport::new(
            disease,
            severity,
            *reading,
            model.holdout_accuracy(),
            plan,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::csv::CsvLoader;
    use crate::adapters::forest::{ForestConfig, RandomForest};
    use crate::domain::TrainingRecord;

    fn test_service() -> PredictionService<RandomForest, CsvLoader> {
        let forest = RandomForest::with_config(ForestConfig {
            tree_count: 16,
            ..ForestConfig::default()
        });
        PredictionService::with_config(
            Arc::new(forest),
            Arc::new(CsvLoader::new()),
            TrainingConfig::default(),
        )
    }

    fn record(disease: &str, reading: VitalReading) -> TrainingRecord {
        TrainingRecord {
            reading,
            disease: disease.to_string(),
        }
    }

    fn healthy_reading(age: i64) -> VitalReading {
        VitalReading {
            age,
            top_bp: 115,
            bottom_bp: 75,
            sugar: 90,
            chest_pain: false,
            bmi: 22.0,
        }
    }

    fn hypertensive_reading(age: i64) -> VitalReading {
        VitalReading {
            age,
            top_bp: 165,
            bottom_bp: 105,
            sugar: 140,
            chest_pain: false,
            bmi: 29.0,
        }
    }

    /// Two-label table with 24 rows of well-separated vitals.
    fn synthetic_table() -> TrainingTable {
        let mut records = Vec::new();
        for i in 0..12 {
            records.push(record("Healthy", healthy_reading(25 + i)));
            records.push(record("Hypertension", hypertensive_reading(50 + i)));
        }
        TrainingTable::new(records)
    }

    #[test]
    fn test_predict_before_train_is_not_ready() {
        let service = test_service();
        assert!(!service.is_ready());
        assert!(service.accuracy().is_none());

        let err = service
            .predict(&healthy_reading(40))
            .expect_err("must fail");
        assert!(matches!(err, VitalsenseError::NotReady));
    }

    #[test]
    fn test_train_reports_holdout_accuracy() {
        let service = test_service();
        let accuracy = service.train(&synthetic_table()).expect("Should train");

        assert!((0.0..=1.0).contains(&accuracy));
        assert!(service.is_ready());
        assert_eq!(service.accuracy(), Some(accuracy));
    }

    #[test]
    fn test_predict_after_train_returns_a_known_label() {
        let service = test_service();
        service.train(&synthetic_table()).expect("Should train");

        let report = service
            .predict(&hypertensive_reading(55))
            .expect("Should predict");
        assert!(["Healthy", "Hypertension"].contains(&report.disease.as_str()));
        assert!((0.0..=1.0).contains(&report.model_accuracy));
    }

    #[test]
    fn test_predict_is_idempotent_between_trainings() {
        let service = test_service();
        service.train(&synthetic_table()).expect("Should train");

        let reading = hypertensive_reading(57);
        let first = service.predict(&reading).expect("Should predict");
        let second = service.predict(&reading).expect("Should predict");

        assert_eq!(first.disease, second.disease);
        assert_eq!(first.severity, second.severity);
        assert_eq!(first.model_accuracy, second.model_accuracy);
        assert_eq!(first.advice, second.advice);
    }

    #[test]
    fn test_out_of_range_reading_is_rejected_before_model_lookup() {
        let service = test_service();

        let mut reading = healthy_reading(40);
        reading.age = 0;

        // No model yet, but validation must win over NotReady.
        let err = service.predict(&reading).expect_err("must fail");
        assert!(matches!(err, VitalsenseError::Validation(_)));
        assert_eq!(
            service.validate_reading(&reading),
            Some("Age should be between 1 and 120.".to_string())
        );
    }

    #[test]
    fn test_too_small_table_is_rejected() {
        let service = test_service();
        let table = TrainingTable::new(vec![
            record("Healthy", healthy_reading(30)),
            record("Hypertension", hypertensive_reading(60)),
        ]);

        let err = service.train(&table).expect_err("must fail");
        assert!(matches!(
            err,
            VitalsenseError::Train(TrainError::InsufficientData { rows: 2, .. })
        ));
        assert!(!service.is_ready());
    }

    #[test]
    fn test_single_label_table_is_rejected() {
        let service = test_service();
        let records = (0..10)
            .map(|i| record("Healthy", healthy_reading(25 + i)))
            .collect();

        let err = service
            .train(&TrainingTable::new(records))
            .expect_err("must fail");
        assert!(matches!(
            err,
            VitalsenseError::Train(TrainError::TooFewClasses { found: 1 })
        ));
    }

    #[test]
    fn test_failed_train_keeps_previous_model() {
        let service = test_service();
        let accuracy = service.train(&synthetic_table()).expect("Should train");

        let empty = TrainingTable::new(Vec::new());
        service.train(&empty).expect_err("must fail");

        assert_eq!(service.accuracy(), Some(accuracy));
        assert!(service.predict(&healthy_reading(40)).is_ok());
    }

    #[test]
    fn test_retrain_replaces_the_model_atomically() {
        let service = Arc::new(test_service());
        service.train(&synthetic_table()).expect("Should train");

        let readers: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    let reading = hypertensive_reading(50 + i);
                    for _ in 0..50 {
                        let report = service.predict(&reading).expect("Should predict");
                        // Every observed model is a complete one.
                        assert!((0.0..=1.0).contains(&report.model_accuracy));
                        assert!(!report.disease.is_empty());
                    }
                })
            })
            .collect();

        for _ in 0..5 {
            service.train(&synthetic_table()).expect("Should retrain");
        }
        for reader in readers {
            reader.join().expect("reader thread");
        }
    }

    #[test]
    fn test_fixed_seed_makes_training_reproducible() {
        let a = test_service();
        let b = test_service();
        let table = synthetic_table();

        let acc_a = a.train(&table).expect("Should train");
        let acc_b = b.train(&table).expect("Should train");
        assert_eq!(acc_a, acc_b);

        let reading = hypertensive_reading(59);
        assert_eq!(
            a.predict(&reading).expect("Should predict").disease,
            b.predict(&reading).expect("Should predict").disease
        );
    }

    #[test]
    fn test_end_to_end_from_csv() {
        use std::io::Write;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.csv");
        let mut file = std::fs::File::create(&path).expect("create csv");
        writeln!(file, "Age,TopBP,BottomBP,Sugar,ChestPain,BMI,Disease").expect("header");
        for i in 0..10 {
            writeln!(file, "{},115,75,90,No,22.0,Healthy", 25 + i).expect("row");
            writeln!(file, "{},165,105,140,No,29.0,Hypertension", 50 + i).expect("row");
        }
        drop(file);

        let service = test_service();
        let accuracy = service.train_from_path(&path).expect("Should train");
        assert!((0.0..=1.0).contains(&accuracy));

        let report = service
            .predict(&hypertensive_reading(55))
            .expect("Should predict");
        assert_eq!(report.severity, SeverityTier::Low);
    }
}
