use strum::{AsRefStr, EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BmiZone {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

struct ZoneBand {
    zone: BmiZone,
    upper_bound: f64,
    label: &'static str,
    color: &'static str,
}

/// Ascending, contiguous bands. A BMI belongs to the first band whose upper
/// bound it is strictly below.
static ZONE_BANDS: [ZoneBand; 4] = [
    ZoneBand {
        zone: BmiZone::Underweight,
        upper_bound: 18.5,
        label: "Niedowaga",
        color: "#3498DB",
    },
    ZoneBand {
        zone: BmiZone::Normal,
        upper_bound: 25.0,
        label: "Norma",
        color: "#27AE60",
    },
    ZoneBand {
        zone: BmiZone::Overweight,
        upper_bound: 30.0,
        label: "Nadwaga",
        color: "#F39C12",
    },
    ZoneBand {
        zone: BmiZone::Obese,
        upper_bound: f64::INFINITY,
        label: "Otyłość",
        color: "#E74C3C",
    },
];

impl BmiZone {
    pub fn classify(bmi: f64) -> Self {
        ZONE_BANDS
            .iter()
            .find(|band| bmi < band.upper_bound)
            .map(|band| band.zone)
            .unwrap_or(BmiZone::Obese)
    }

    fn band(&self) -> &'static ZoneBand {
        &ZONE_BANDS[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.band().label
    }

    pub fn color(&self) -> &'static str {
        self.band().color
    }

    /// Exclusive upper bound of the zone, infinite for the last one.
    pub fn upper_bound(&self) -> f64 {
        self.band().upper_bound
    }

    /// Inclusive lower bound of the zone.
    pub fn lower_bound(&self) -> f64 {
        match *self as usize {
            0 => 0.0,
            i => ZONE_BANDS[i - 1].upper_bound,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        BmiZone::iter().find(|zone| zone.label() == label)
    }

    pub fn all() -> impl Iterator<Item = BmiZone> {
        BmiZone::iter()
    }
}

#[cfg(feature = "serde")]
mod wire {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::BmiZone;

    #[derive(Serialize, Deserialize)]
    struct ZoneDto<'a> {
        label: std::borrow::Cow<'a, str>,
        color: std::borrow::Cow<'a, str>,
    }

    impl Serialize for BmiZone {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            ZoneDto {
                label: self.label().into(),
                color: self.color().into(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for BmiZone {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let dto = ZoneDto::deserialize(deserializer)?;
            BmiZone::from_label(&dto.label)
                .ok_or_else(|| de::Error::custom(format!("unknown BMI zone \"{}\"", dto.label)))
        }
    }
}
