//! Per-field traffic-light statuses for live input feedback.
//!
//! Hosts call [`field_status`] on each keystroke to color an input field
//! before the full reading is submitted. Thresholds are a data table, one
//! row per vital.

/// The six input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalField {
    Age,
    TopBp,
    BottomBp,
    Sugar,
    ChestPain,
    Bmi,
}

impl VitalField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::TopBp => "top_bp",
            Self::BottomBp => "bottom_bp",
            Self::Sugar => "sugar",
            Self::ChestPain => "chest_pain",
            Self::Bmi => "bmi",
        }
    }
}

/// Status of one field's current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Within the acceptable range
    Normal,
    /// Parseable but outside the acceptable range
    OutOfRange,
    /// Above the field's high-risk threshold
    HighRisk,
    /// Not parseable as a number (empty, placeholder text, ...)
    Unknown,
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "ok"),
            Self::OutOfRange => write!(f, "out-of-range"),
            Self::HighRisk => write!(f, "high-risk"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

struct FieldRange {
    min: f64,
    max: f64,
    high_risk: Option<f64>,
}

const fn range_for(field: VitalField) -> FieldRange {
    match field {
        VitalField::Age => FieldRange {
            min: 1.0,
            max: 120.0,
            high_risk: None,
        },
        VitalField::TopBp => FieldRange {
            min: 90.0,
            max: 180.0,
            high_risk: Some(140.0),
        },
        VitalField::BottomBp => FieldRange {
            min: 60.0,
            max: 120.0,
            high_risk: Some(90.0),
        },
        VitalField::Sugar => FieldRange {
            min: 50.0,
            max: 500.0,
            high_risk: Some(200.0),
        },
        VitalField::ChestPain => FieldRange {
            min: 0.0,
            max: 1.0,
            high_risk: Some(0.0),
        },
        VitalField::Bmi => FieldRange {
            min: 10.0,
            max: 60.0,
            high_risk: Some(30.0),
        },
    }
}

/// Classify one field's raw text. High risk takes precedence over
/// out-of-range; unparseable input is `Unknown`, never an error.
#[must_use]
pub fn field_status(field: VitalField, raw: &str) -> FieldStatus {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return FieldStatus::Unknown;
    };
    let range = range_for(field);

    if let Some(threshold) = range.high_risk {
        if value > threshold {
            return FieldStatus::HighRisk;
        }
    }
    if value < range.min || value > range.max {
        FieldStatus::OutOfRange
    } else {
        FieldStatus::Normal
    }
}
