//! Classifier port: Traits for the disease classification algorithm.
//!
//! These traits abstract the concrete learner from the application logic,
//! so the training service can be exercised against lightweight stand-ins.

use crate::domain::FEATURE_COUNT;

/// Errors raised when training preconditions are not met.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainError {
    #[error("training table has {rows} row(s); at least {min} are required for a holdout split")]
    InsufficientData { rows: usize, min: usize },

    #[error("training table contains {found} distinct disease label(s); at least 2 are required")]
    TooFewClasses { found: usize },
}

/// Trait for trainable classifiers.
pub trait Classifier: Send + Sync {
    /// Fitted model state produced by [`Classifier::fit`].
    type Fitted: FittedClassifier;

    /// Fit a model over feature rows and their class indices.
    ///
    /// `seed` drives every random choice the learner makes; two fits with
    /// the same inputs and seed must produce identical models.
    ///
    /// # Errors
    /// Returns `TrainError` if the inputs cannot support a fit.
    fn fit(
        &self,
        features: &[[f64; FEATURE_COUNT]],
        labels: &[usize],
        seed: u64,
    ) -> Result<Self::Fitted, TrainError>;
}

/// Trait for fitted model state.
///
/// Implementations must be deterministic: the same feature row always maps
/// to the same class index for the lifetime of the fitted model.
pub trait FittedClassifier: Send + Sync {
    /// Predict the most likely class index for one feature row, presented
    /// in the locked column order.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> usize;
}
