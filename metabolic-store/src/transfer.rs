//! JSON export and import of the measurement history.

use log::info;
use metabolic_model::Measurement;

use crate::{measurement::MeasurementRepository, Result};

pub async fn export(repository: &dyn MeasurementRepository) -> Result<String> {
    let measurements = repository.fetch_measurements().await?;
    info!("Exporting {} measurements", measurements.len());
    Ok(serde_json::to_string_pretty(&measurements)?)
}

/// Replaces the stored history with the measurements in `json`, which must
/// be an array. Nothing is changed when it cannot be parsed.
pub async fn import(repository: &dyn MeasurementRepository, json: &str) -> Result<usize> {
    let measurements: Vec<Measurement> = serde_json::from_str(json)?;
    let count = measurements.len();
    info!("Importing {} measurements", count);
    repository.replace_all(measurements).await?;
    Ok(count)
}
