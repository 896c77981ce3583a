//! Vital reading types for disease prediction.
//!
//! The six vitals match the training dataset schema (see `dataset`).

use serde::{Deserialize, Serialize};

use super::dataset::FEATURE_COUNT;

/// A violated input range. Messages are the ones shown to the operator.
///
/// Rules are checked in a fixed order: age, top BP, bottom BP, sugar,
/// chest pain, BMI; the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Age should be between 1 and 120.")]
    Age,

    #[error("Top BP should be between 90 and 180.")]
    TopBp,

    #[error("Bottom BP should be between 60 and 120.")]
    BottomBp,

    #[error("Sugar Level should be between 50 and 500.")]
    Sugar,

    #[error("Chest Pain must be 0 (No) or 1 (Yes).")]
    ChestPain,

    #[error("BMI should be between 10 and 60.")]
    Bmi,
}

/// One set of patient vitals, entered per prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    /// Age in years
    pub age: i64,

    /// Systolic (top) blood pressure in mmHg
    pub top_bp: i64,

    /// Diastolic (bottom) blood pressure in mmHg
    pub bottom_bp: i64,

    /// Blood sugar in mg/dL
    pub sugar: i64,

    /// Whether the patient reports chest pain
    pub chest_pain: bool,

    /// Body mass index
    pub bmi: f64,
}

impl VitalReading {
    /// Build a reading from raw operator input, applying the full range
    /// check sequence. The chest-pain flag arrives as 0/1 here because
    /// that is how callers collect it.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn from_raw(
        age: i64,
        top_bp: i64,
        bottom_bp: i64,
        sugar: i64,
        chest_pain: i64,
        bmi: f64,
    ) -> Result<Self, ValidationError> {
        if !(0 < age && age < 120) {
            return Err(ValidationError::Age);
        }
        if !(90..=180).contains(&top_bp) {
            return Err(ValidationError::TopBp);
        }
        if !(60..=120).contains(&bottom_bp) {
            return Err(ValidationError::BottomBp);
        }
        if !(50..=500).contains(&sugar) {
            return Err(ValidationError::Sugar);
        }
        let chest_pain = match chest_pain {
            0 => false,
            1 => true,
            _ => return Err(ValidationError::ChestPain),
        };
        if !(10.0..=60.0).contains(&bmi) {
            return Err(ValidationError::Bmi);
        }

        Ok(Self {
            age,
            top_bp,
            bottom_bp,
            sugar,
            chest_pain,
            bmi,
        })
    }

    /// Validate an already-constructed reading against the same ranges.
    ///
    /// The chest-pain flag is a `bool` and cannot violate its rule here;
    /// it is enforced by [`VitalReading::from_raw`] and the dataset loader.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::from_raw(
            self.age,
            self.top_bp,
            self.bottom_bp,
            self.sugar,
            i64::from(self.chest_pain),
            self.bmi,
        )
        .map(|_| ())
    }

    /// Convert the reading to a feature row for the classifier.
    /// Order matches [`crate::domain::FEATURE_COLUMNS`]:
    /// Age, TopBP, BottomBP, Sugar, BMI, ChestPain.
    #[must_use]
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            self.top_bp as f64,
            self.bottom_bp as f64,
            self.sugar as f64,
            self.bmi,
            f64::from(u8::from(self.chest_pain)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> VitalReading {
        VitalReading {
            age: 45,
            top_bp: 120,
            bottom_bp: 80,
            sugar: 95,
            chest_pain: false,
            bmi: 23.5,
        }
    }

    #[test]
    fn test_in_range_reading_passes() {
        assert!(healthy().validate().is_ok());
    }

    #[test]
    fn test_age_bounds_are_exclusive() {
        let mut reading = healthy();
        reading.age = 0;
        assert_eq!(reading.validate(), Err(ValidationError::Age));

        reading.age = 120;
        assert_eq!(reading.validate(), Err(ValidationError::Age));

        reading.age = 1;
        assert!(reading.validate().is_ok());
        reading.age = 119;
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        // Both age and BMI are out of range; age is checked first.
        let reading = VitalReading {
            age: 150,
            bmi: 70.0,
            ..healthy()
        };
        assert_eq!(reading.validate(), Err(ValidationError::Age));
    }

    #[test]
    fn test_bp_sugar_bmi_bounds_are_inclusive() {
        let reading = VitalReading {
            age: 45,
            top_bp: 180,
            bottom_bp: 60,
            sugar: 500,
            chest_pain: true,
            bmi: 10.0,
        };
        assert!(reading.validate().is_ok());

        let mut reading = reading;
        reading.top_bp = 181;
        assert_eq!(reading.validate(), Err(ValidationError::TopBp));
    }

    #[test]
    fn test_from_raw_rejects_bad_chest_pain_flag() {
        let err = VitalReading::from_raw(45, 120, 80, 95, 2, 23.5).expect_err("must reject");
        assert_eq!(err, ValidationError::ChestPain);
        assert_eq!(err.to_string(), "Chest Pain must be 0 (No) or 1 (Yes).");
    }

    #[test]
    fn test_feature_order() {
        let reading = VitalReading {
            age: 45,
            top_bp: 120,
            bottom_bp: 80,
            sugar: 95,
            chest_pain: true,
            bmi: 23.5,
        };
        assert_eq!(reading.to_features(), [45.0, 120.0, 80.0, 95.0, 23.5, 1.0]);
    }
}
