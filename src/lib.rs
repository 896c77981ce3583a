//! # Vitalsense
//!
//! Disease prediction pipeline over six patient vitals.
//!
//! This crate provides:
//! - Strict CSV dataset ingestion with schema validation
//! - A from-scratch bagged decision-tree classifier with a holdout accuracy
//!   estimate computed at training time
//! - Rule-based severity scoring and a static care-advice catalog
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (VitalReading, SeverityTier, advice catalog)
//! - `ports`: Trait definitions for the pluggable pipeline pieces
//! - `adapters`: Concrete implementations (csv ingestion, random forest)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::PredictionService;
pub use domain::{HealthReport, SeverityTier, VitalReading};

/// Result type for Vitalsense operations
pub type Result<T> = std::result::Result<T, VitalsenseError>;

/// Main error type for Vitalsense
#[derive(Debug, thiserror::Error)]
pub enum VitalsenseError {
    #[error("Dataset load failed: {0}")]
    Load(#[from] adapters::LoadError),

    #[error("Training failed: {0}")]
    Train(#[from] ports::TrainError),

    #[error("Invalid vital reading: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("No trained model available; load a dataset and train first")]
    NotReady,
}
