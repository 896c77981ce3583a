//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the working machinery behind the trait seams:
//! - `csv`: dataset ingestion from comma-separated files
//! - `forest`: from-scratch bagged decision-tree classifier

pub mod csv;
pub mod forest;

// Re-export load error for lib.rs
pub use self::csv::LoadError;
