//! Body-composition formulas. All functions are pure and expect inputs that
//! already passed validation.

use crate::input::{ActivityLevel, Gender};

const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.453_592_37;
const BMI_PRIME_REFERENCE: f64 = 25.0;

pub fn body_mass_index(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Mifflin-St Jeor equation.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn total_daily_energy_expenditure(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// YMCA body fat estimate from waist circumference and weight. The
/// age-based regression `86.01 * waist / weight - 70.041 * age + 36.76` is
/// not used: it goes negative for any adult age.
pub fn body_fat_percentage(gender: Gender, weight_kg: f64, waist_cm: f64) -> f64 {
    let weight_lb = weight_kg / KG_PER_LB;
    let waist_in = waist_cm / CM_PER_INCH;
    let offset = match gender {
        Gender::Male => 98.42,
        Gender::Female => 76.76,
    };

    (4.15 * waist_in - 0.082 * weight_lb - offset) / weight_lb * 100.0
}

pub fn lean_body_mass(weight_kg: f64, body_fat_percentage: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percentage / 100.0)
}

/// Robinson formula: base weight at five feet plus a fixed amount per inch above it.
pub fn ideal_weight(height_cm: f64, gender: Gender) -> f64 {
    let inches_over_five_feet = height_cm / CM_PER_INCH - 60.0;
    match gender {
        Gender::Male => 52.0 + 1.9 * inches_over_five_feet,
        Gender::Female => 49.0 + 1.7 * inches_over_five_feet,
    }
}

/// Published BAI, with height raised to 1.5. Squaring the height instead
/// turns it into a BMI-like ratio with the wrong scale.
pub fn body_adiposity_index(hip_cm: f64, height_m: f64) -> f64 {
    hip_cm / height_m.powf(1.5) - 18.0
}

/// Both arguments in the same unit.
pub fn waist_to_height_ratio(waist: f64, height: f64) -> f64 {
    waist / height
}

pub fn bmi_prime(bmi: f64) -> f64 {
    bmi / BMI_PRIME_REFERENCE
}

pub fn ponderal_index(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / height_m.powi(3) * 100.0
}

pub fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round_to_kcal(value: f64) -> f64 {
    value.round()
}
