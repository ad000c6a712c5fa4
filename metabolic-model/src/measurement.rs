use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    input::{ActivityLevel, BiometricInput, Gender},
    result::{MetabolicResult, SecondaryIndices},
};

/// A stored measurement, keyed by an opaque identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Measurement {
    pub id: String,
    pub date: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: NewMeasurement,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    serde_with::skip_serializing_none,
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct NewMeasurement {
    pub weight: f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub waist: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hip: Option<f64>,
    pub age: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub bmi: f64,
    pub bmr: i64,
    pub tdee: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub body_fat_percentage: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,
}

impl NewMeasurement {
    pub fn from_calculation(
        input: &BiometricInput,
        result: &MetabolicResult,
        waist: Option<f64>,
        hip: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        let indices = SecondaryIndices::compute(input, waist, hip);
        Self {
            weight: input.weight_kg,
            height: input.height_cm,
            waist,
            hip,
            age: input.age_years,
            gender: input.gender,
            activity_level: input.activity_level,
            bmi: result.bmi,
            bmr: result.bmr,
            tdee: result.tdee,
            body_fat_percentage: indices.body_fat_percentage,
            notes,
        }
    }
}

/// Partial update of a stored measurement. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct MeasurementUpdate {
    pub date: Option<DateTime<Utc>>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub bmi: Option<f64>,
    pub bmr: Option<i64>,
    pub tdee: Option<i64>,
    pub body_fat_percentage: Option<f64>,
    pub notes: Option<String>,
}

impl Measurement {
    pub fn apply(&mut self, update: MeasurementUpdate) {
        if let Some(date) = update.date {
            self.date = date;
        }
        let data = &mut self.data;
        if let Some(weight) = update.weight {
            data.weight = weight;
        }
        if let Some(height) = update.height {
            data.height = height;
        }
        if update.waist.is_some() {
            data.waist = update.waist;
        }
        if update.hip.is_some() {
            data.hip = update.hip;
        }
        if let Some(age) = update.age {
            data.age = age;
        }
        if let Some(gender) = update.gender {
            data.gender = gender;
        }
        if let Some(activity_level) = update.activity_level {
            data.activity_level = activity_level;
        }
        if let Some(bmi) = update.bmi {
            data.bmi = bmi;
        }
        if let Some(bmr) = update.bmr {
            data.bmr = bmr;
        }
        if let Some(tdee) = update.tdee {
            data.tdee = tdee;
        }
        if update.body_fat_percentage.is_some() {
            data.body_fat_percentage = update.body_fat_percentage;
        }
        if update.notes.is_some() {
            data.notes = update.notes;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Profile {
    pub height: f64,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
}

impl Profile {
    /// Age in completed years on the given day.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.date_of_birth).unwrap_or(0)
    }
}
