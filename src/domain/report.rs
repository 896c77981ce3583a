//! Health report: the summary-panel value returned per prediction.

use serde::{Deserialize, Serialize};

use super::advice::CarePlan;
use super::severity::SeverityTier;
use super::vitals::VitalReading;

/// Outcome of one prediction request, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Predicted disease label, verbatim from the training data
    pub disease: String,

    /// Severity tier of the entered vitals
    pub severity: SeverityTier,

    /// The vitals the report was computed from
    pub reading: VitalReading,

    /// Holdout accuracy of the model that produced the prediction (0..=1)
    pub model_accuracy: f64,

    /// Advice text for (disease, severity)
    pub advice: String,

    /// Diet text for (disease, severity)
    pub diet: String,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn new(
        disease: String,
        severity: SeverityTier,
        reading: VitalReading,
        model_accuracy: f64,
        plan: CarePlan,
    ) -> Self {
        Self {
            disease,
            severity,
            reading,
            model_accuracy,
            advice: plan.advice.to_string(),
            diet: plan.diet.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl std::fmt::Display for HealthReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Predicted Disease: {}\n\
             Severity Level: {}\n\
             BP: {}/{} mmHg\n\
             Model Accuracy: {:.2}%\n\
             Health Advice: {}\n\
             Diet Plan: {}",
            self.disease,
            self.severity,
            self.reading.top_bp,
            self.reading.bottom_bp,
            self.model_accuracy * 100.0,
            self.advice,
            self.diet
        )
    }
}
