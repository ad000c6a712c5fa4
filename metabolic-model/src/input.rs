use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn key(&self) -> &str {
        self.as_ref()
    }
}

/// Activity levels, ordered from the least to the most active. Older
/// records spell `very_active` as `very active`; both are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    #[strum(to_string = "very_active", serialize = "very active")]
    #[cfg_attr(feature = "serde", serde(alias = "very active"))]
    VeryActive,
}

#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ActivityProfile {
    pub level: ActivityLevel,
    pub multiplier: f64,
    pub label: &'static str,
    pub description: &'static str,
}

static ACTIVITY_PROFILES: [ActivityProfile; 5] = [
    ActivityProfile {
        level: ActivityLevel::Sedentary,
        multiplier: 1.2,
        label: "Siedzący",
        description: "Brak lub minimalna aktywność",
    },
    ActivityProfile {
        level: ActivityLevel::Light,
        multiplier: 1.375,
        label: "Lekka aktywność",
        description: "Ćwiczenia 1-3 dni/tydzień",
    },
    ActivityProfile {
        level: ActivityLevel::Moderate,
        multiplier: 1.55,
        label: "Umiarkowana",
        description: "Ćwiczenia 3-5 dni/tydzień",
    },
    ActivityProfile {
        level: ActivityLevel::Active,
        multiplier: 1.725,
        label: "Aktywny",
        description: "Ćwiczenia 6-7 dni/tydzień",
    },
    ActivityProfile {
        level: ActivityLevel::VeryActive,
        multiplier: 1.9,
        label: "Bardzo aktywny",
        description: "Ciężkie ćwiczenia codziennie",
    },
];

impl ActivityLevel {
    /// Resolves a wire key such as `"very_active"`. Unknown or empty keys
    /// resolve to [`ActivityLevel::Sedentary`].
    pub fn from_key(key: &str) -> Self {
        key.trim().parse().unwrap_or(ActivityLevel::Sedentary)
    }

    pub fn key(&self) -> &str {
        self.as_ref()
    }

    pub fn profile(&self) -> &'static ActivityProfile {
        &ACTIVITY_PROFILES[*self as usize]
    }

    pub fn multiplier(&self) -> f64 {
        self.profile().multiplier
    }

    pub fn all() -> impl Iterator<Item = ActivityLevel> {
        ActivityLevel::iter()
    }

    /// Every level with its multiplier and display texts, in order.
    pub fn profiles() -> &'static [ActivityProfile] {
        &ACTIVITY_PROFILES
    }
}

impl Default for ActivityLevel {
    fn default() -> Self {
        ActivityLevel::Sedentary
    }
}

/// Validated biometric input. Values are within the ranges enforced by
/// [`crate::validation`]; nothing downstream checks them again.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BiometricInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
}

impl BiometricInput {
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}

/// Form input as typed by the user, before any parsing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct RawBiometricInput {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub gender: String,
    pub activity_level: String,
}

/// Body of a calculation request sent to the server. A missing, null or
/// non-string activity level reads as an empty key, i.e. sedentary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalculateRequest {
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub gender: Gender,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "serde_with::As::<serde_with::DefaultOnError>::deserialize"
        )
    )]
    pub activity_level: String,
}

impl From<&BiometricInput> for CalculateRequest {
    fn from(input: &BiometricInput) -> Self {
        Self {
            height: input.height_cm,
            weight: input.weight_kg,
            age: input.age_years,
            gender: input.gender,
            activity_level: input.activity_level.key().to_owned(),
        }
    }
}
