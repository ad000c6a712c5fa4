use std::{error::Error, fs::File, io::BufReader, path::Path};

use itertools::Itertools;
use log::{error, info};
use metabolic_client::{Calculation, Calculator, Client};
use metabolic_model::{NewMeasurement, RawBiometricInput, ValidationErrors};
use serde::de::DeserializeOwned;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// One line per invalid field, e.g. `weight: Podaj wagę (30-300 kg)`.
pub fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .fields()
        .map(|(field, message)| format!("{}: {}", field, message))
        .join("\n")
}

/// Calculates a form and optionally stores the result on the server.
pub async fn calculate_form(
    calculator: &Calculator,
    raw: &RawBiometricInput,
    save: bool,
) -> Result<Calculation, Box<dyn Error>> {
    let calculation = calculator.calculate(raw).await?;

    if save {
        let measurement = NewMeasurement::from_calculation(
            &calculation.input,
            &calculation.result,
            None,
            None,
            None,
        );
        let stored = calculator.client().post_measurement(&measurement).await?;
        info!("Saved measurement {}", stored.id);
    }

    Ok(calculation)
}

pub struct Importer {
    client: Box<dyn Client>,
}

impl Importer {
    pub fn new(client: Box<dyn Client>) -> Self {
        Self { client }
    }

    /// Posts every record, skipping the ones the server rejects. Returns the
    /// number of records stored.
    pub async fn run(&self, measurements: &[NewMeasurement]) -> usize {
        info!("Importing {} measurements", measurements.len());
        let mut stored = 0;
        for (i, measurement) in measurements.iter().enumerate() {
            match self.client.post_measurement(measurement).await {
                Ok(m) => {
                    info!("Stored record #{} as {}", i, m.id);
                    stored += 1;
                }
                Err(e) => error!("Failed to store record #{}, skipping. {}", i, e),
            }
        }
        stored
    }
}
