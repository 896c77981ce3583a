//! Domain layer: Core business types and logic.
//!
//! Everything here is deterministic and side-effect free; the adapters and
//! services build on these types but never the other way around.

mod advice;
mod dataset;
mod indicator;
mod report;
mod severity;
mod vitals;

pub use advice::{care_plan, CarePlan};
pub use dataset::{
    TrainingRecord, TrainingTable, FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN, REQUIRED_COLUMNS,
};
pub use indicator::{field_status, FieldStatus, VitalField};
pub use report::HealthReport;
pub use severity::SeverityTier;
pub use vitals::{ValidationError, VitalReading};
