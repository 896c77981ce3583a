//! Vitalsense: command-line host for the prediction core.
//!
//! Loads a training CSV, fits the classifier, evaluates one vital reading
//! and prints the summary panel text (or JSON with `--json`).

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use vitalsense::adapters::csv::CsvLoader;
use vitalsense::adapters::forest::RandomForest;
use vitalsense::application::PredictionService;
use vitalsense::domain::{field_status, VitalField};
use vitalsense::VitalReading;

fn main() -> Result<()> {
    // Log to stderr so piping the report stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args[1..].iter().filter(|a| !a.starts_with("--")).collect();

    if positional.len() != 7 {
        bail!(
            "Usage: vitalsense <dataset.csv> <age> <top_bp> <bottom_bp> <sugar> <chest_pain 0|1> <bmi> [--json]"
        );
    }

    let dataset = positional[0];
    let int = |raw: &str, name: &str| -> Result<i64> {
        raw.parse().with_context(|| format!("invalid {name} '{raw}'"))
    };
    let age = int(positional[1], "age")?;
    let top_bp = int(positional[2], "top_bp")?;
    let bottom_bp = int(positional[3], "bottom_bp")?;
    let sugar = int(positional[4], "sugar")?;
    let chest_pain = int(positional[5], "chest_pain")?;
    let bmi: f64 = positional[6]
        .parse()
        .with_context(|| format!("invalid bmi '{}'", positional[6]))?;

    let checks = [
        (VitalField::Age, positional[1]),
        (VitalField::TopBp, positional[2]),
        (VitalField::BottomBp, positional[3]),
        (VitalField::Sugar, positional[4]),
        (VitalField::ChestPain, positional[5]),
        (VitalField::Bmi, positional[6]),
    ];
    let status_line = checks
        .iter()
        .map(|(field, raw)| format!("{}={}", field.name(), field_status(*field, raw.as_str())))
        .collect::<Vec<_>>()
        .join(" ");
    tracing::info!("Input check: {status_line}");

    let reading = VitalReading::from_raw(age, top_bp, bottom_bp, sugar, chest_pain, bmi)?;

    let service = PredictionService::new(Arc::new(RandomForest::new()), Arc::new(CsvLoader::new()));
    let accuracy = service.train_from_path(Path::new(dataset))?;
    tracing::info!("Model trained, holdout accuracy {:.2}%", accuracy * 100.0);

    let report = service.predict(&reading)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
