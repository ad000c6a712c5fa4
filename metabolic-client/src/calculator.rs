use log::{info, warn};
use metabolic_model::{
    validate, BiometricInput, CalculateRequest, MetabolicResult, RawBiometricInput,
    ValidationErrors,
};

use crate::client::Client;

/// Outcome of a calculation together with the input it was computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub input: BiometricInput,
    pub result: MetabolicResult,
    /// `false` when the server could not be used and the result was
    /// computed locally.
    pub remote: bool,
}

/// Calculates through the server, falling back to the local formulas when
/// the server cannot be used. Both paths give the same result.
pub struct Calculator {
    client: Box<dyn Client>,
}

impl Calculator {
    pub fn new(client: Box<dyn Client>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &dyn Client {
        self.client.as_ref()
    }

    /// Validates the form first; nothing is calculated when any field is
    /// invalid.
    pub async fn calculate(
        &self,
        raw: &RawBiometricInput,
    ) -> Result<Calculation, ValidationErrors> {
        let input = validate(raw)?;
        Ok(self.calculate_input(input).await)
    }

    pub async fn calculate_input(&self, input: BiometricInput) -> Calculation {
        let request = CalculateRequest::from(&input);
        match self.client.calculate(&request).await {
            Ok(result) => {
                info!("Calculated remotely");
                Calculation {
                    input,
                    result,
                    remote: true,
                }
            }
            Err(e) => {
                warn!("Remote calculation failed ({}), calculating locally", e);
                let result = metabolic_model::calculate(&input);
                Calculation {
                    input,
                    result,
                    remote: false,
                }
            }
        }
    }
}
