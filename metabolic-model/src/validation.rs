use std::{collections::BTreeMap, fmt, ops::RangeInclusive};

use strum::{AsRefStr, Display};

use crate::input::{ActivityLevel, BiometricInput, CalculateRequest, Gender, RawBiometricInput};

pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=300.0;
pub const AGE_RANGE_YEARS: RangeInclusive<f64> = 15.0..=120.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Field {
    Height,
    Weight,
    Age,
    Gender,
}

impl Field {
    fn message(&self) -> &'static str {
        match self {
            Field::Height => "Podaj wzrost (100-250 cm)",
            Field::Weight => "Podaj wagę (30-300 kg)",
            Field::Age => "Podaj wiek (15-120 lat)",
            Field::Gender => "Wybierz płeć",
        }
    }
}

/// Every field that failed validation, with a user-facing message.
#[derive(Clone, Debug, Default, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: Field) {
        self.fields.insert(field, field.message().to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

fn check(
    value: Option<f64>,
    range: &RangeInclusive<f64>,
    field: Field,
    errors: &mut ValidationErrors,
) -> f64 {
    match value {
        Some(value) if range.contains(&value) => value,
        _ => {
            errors.add(field);
            f64::NAN
        }
    }
}

/// Validates form input. Numbers accept a decimal comma. The activity level
/// is never rejected: unknown keys resolve to sedentary.
pub fn validate(raw: &RawBiometricInput) -> Result<BiometricInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let height_cm = check(parse_number(&raw.height), &HEIGHT_RANGE_CM, Field::Height, &mut errors);
    let weight_kg = check(parse_number(&raw.weight), &WEIGHT_RANGE_KG, Field::Weight, &mut errors);
    let age_years = check(parse_number(&raw.age), &AGE_RANGE_YEARS, Field::Age, &mut errors);
    let gender = raw.gender.trim().parse::<Gender>().ok();
    if gender.is_none() {
        errors.add(Field::Gender);
    }

    match gender {
        Some(gender) if errors.is_empty() => Ok(BiometricInput {
            height_cm,
            weight_kg,
            age_years,
            gender,
            activity_level: ActivityLevel::from_key(&raw.activity_level),
        }),
        _ => Err(errors),
    }
}

/// Validates an already numeric request with the same ranges as [`validate`].
pub fn validate_request(request: &CalculateRequest) -> Result<BiometricInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let height_cm = check(Some(request.height), &HEIGHT_RANGE_CM, Field::Height, &mut errors);
    let weight_kg = check(Some(request.weight), &WEIGHT_RANGE_KG, Field::Weight, &mut errors);
    let age_years = check(Some(request.age), &AGE_RANGE_YEARS, Field::Age, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(BiometricInput {
        height_cm,
        weight_kg,
        age_years,
        gender: request.gender,
        activity_level: ActivityLevel::from_key(&request.activity_level),
    })
}
