use crate::{
    input::BiometricInput,
    metrics,
    recommendation::{self, Recommendation},
    zone::BmiZone,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MetabolicResult {
    pub bmi: f64,
    pub bmi_zone: BmiZone,
    pub bmr: i64,
    pub tdee: i64,
    pub recommendations: Vec<Recommendation>,
}

/// Runs the whole calculation for validated input. Rounding is applied here
/// and nowhere earlier.
pub fn calculate(input: &BiometricInput) -> MetabolicResult {
    let bmi = metrics::body_mass_index(input.weight_kg, input.height_m());
    let bmi_zone = BmiZone::classify(bmi);
    let bmr = metrics::basal_metabolic_rate(
        input.weight_kg,
        input.height_cm,
        input.age_years,
        input.gender,
    );
    let tdee = metrics::total_daily_energy_expenditure(bmr, input.activity_level);

    let tdee = metrics::round_to_kcal(tdee) as i64;
    MetabolicResult {
        bmi: metrics::round_to_tenths(bmi),
        bmi_zone,
        bmr: metrics::round_to_kcal(bmr) as i64,
        tdee,
        recommendations: recommendation::select(bmi_zone, tdee),
    }
}

/// Supplementary indices. Those needing a circumference are only present
/// when it was measured.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    serde_with::skip_serializing_none,
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SecondaryIndices {
    pub bmi_prime: f64,
    pub ponderal_index: f64,
    pub ideal_weight_kg: f64,
    pub waist_to_height_ratio: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub lean_body_mass_kg: Option<f64>,
    pub body_adiposity_index: Option<f64>,
}

impl SecondaryIndices {
    pub fn compute(input: &BiometricInput, waist_cm: Option<f64>, hip_cm: Option<f64>) -> Self {
        let height_m = input.height_m();
        let bmi = metrics::body_mass_index(input.weight_kg, height_m);
        let body_fat_percentage =
            waist_cm.map(|waist| metrics::body_fat_percentage(input.gender, input.weight_kg, waist));

        Self {
            bmi_prime: metrics::bmi_prime(bmi),
            ponderal_index: metrics::ponderal_index(input.weight_kg, height_m),
            ideal_weight_kg: metrics::ideal_weight(input.height_cm, input.gender),
            waist_to_height_ratio: waist_cm
                .map(|waist| metrics::waist_to_height_ratio(waist, input.height_cm)),
            body_fat_percentage,
            lean_body_mass_kg: body_fat_percentage
                .map(|fat| metrics::lean_body_mass(input.weight_kg, fat)),
            body_adiposity_index: hip_cm
                .map(|hip| metrics::body_adiposity_index(hip, height_m)),
        }
    }
}
