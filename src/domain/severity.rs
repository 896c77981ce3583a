//! Severity scoring for a vital reading.

use serde::{Deserialize, Serialize};

use super::vitals::VitalReading;

/// Severity tier derived from a fixed four-rule point score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    /// Score 0 or 1
    Low,
    /// Score 2
    Medium,
    /// Score 3 or 4
    High,
}

impl SeverityTier {
    /// Score a reading: one point each for elevated blood pressure
    /// (top > 140 or bottom > 90), sugar > 200, BMI > 30, and chest pain.
    #[must_use]
    pub fn of(reading: &VitalReading) -> Self {
        let mut score = 0u8;
        if reading.top_bp > 140 || reading.bottom_bp > 90 {
            score += 1;
        }
        if reading.sugar > 200 {
            score += 1;
        }
        if reading.bmi > 30.0 {
            score += 1;
        }
        if reading.chest_pain {
            score += 1;
        }

        match score {
            3.. => Self::High,
            2 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}
