use strum::AsRefStr;

use crate::zone::BmiZone;

const PRIMARY_COLOR: &str = "#6B9E78";
const HYDRATION_COLOR: &str = "#3498DB";
const RECOVERY_COLOR: &str = "#9B59B6";
const NUTRITION_COLOR: &str = "#E8A87C";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Icon {
    Activity,
    Heart,
    Coffee,
    Moon,
    Droplet,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Recommendation {
    pub icon: Icon,
    pub title: String,
    pub description: String,
    pub accent_color: String,
}

/// Calorie guidance template. `{tdee}` in the description is replaced with
/// the rounded TDEE.
struct CalorieTemplate {
    title: &'static str,
    description: &'static str,
    accent_color: &'static str,
}

const GAIN_TEMPLATE: CalorieTemplate = CalorieTemplate {
    title: "Zwiększ kaloryczność",
    description: "Twoje zapotrzebowanie kaloryczne to około {tdee} kcal. Rozważ zwiększenie spożycia o 300-500 kcal dziennie, aby bezpiecznie przytyć.",
    accent_color: "#3498DB",
};

const DEFICIT_TEMPLATE: CalorieTemplate = CalorieTemplate {
    title: "Deficyt kaloryczny",
    description: "Przy TDEE {tdee} kcal, rozważ redukcję o 300-500 kcal dziennie. To pozwoli na zdrową utratę 0.5-1 kg tygodniowo.",
    accent_color: "#F39C12",
};

const MAINTAIN_TEMPLATE: CalorieTemplate = CalorieTemplate {
    title: "Utrzymuj balans",
    description: "Twoje BMI jest w normie! Utrzymuj spożycie około {tdee} kcal dziennie, aby zachować zdrową wagę.",
    accent_color: "#27AE60",
};

struct FixedAdvice {
    icon: Icon,
    title: &'static str,
    description: &'static str,
    accent_color: &'static str,
}

static FIXED_ADVICE: [FixedAdvice; 4] = [
    FixedAdvice {
        icon: Icon::Activity,
        title: "Aktywność fizyczna",
        description: "Zalecane jest co najmniej 150 minut umiarkowanej aktywności fizycznej tygodniowo lub 75 minut intensywnych ćwiczeń.",
        accent_color: PRIMARY_COLOR,
    },
    FixedAdvice {
        icon: Icon::Droplet,
        title: "Nawodnienie",
        description: "Pij co najmniej 2-2.5 litra wody dziennie. Nawodnienie wpływa na metabolizm i ogólne samopoczucie.",
        accent_color: HYDRATION_COLOR,
    },
    FixedAdvice {
        icon: Icon::Moon,
        title: "Regeneracja",
        description: "Sen 7-9 godzin dziennie wspomaga metabolizm, regenerację mięśni i regulację hormonów odpowiedzialnych za apetyt.",
        accent_color: RECOVERY_COLOR,
    },
    FixedAdvice {
        icon: Icon::Coffee,
        title: "Regularne posiłki",
        description: "Jedz 3-5 posiłków dziennie o stałych porach. Ogranicz kofeinę po południu, aby nie zaburzać snu i apetytu.",
        accent_color: NUTRITION_COLOR,
    },
];

fn calorie_template(zone: BmiZone) -> &'static CalorieTemplate {
    match zone {
        BmiZone::Underweight => &GAIN_TEMPLATE,
        BmiZone::Normal => &MAINTAIN_TEMPLATE,
        BmiZone::Overweight | BmiZone::Obese => &DEFICIT_TEMPLATE,
    }
}

/// Advice for a BMI zone and a daily energy expenditure already rounded to
/// whole kcal. Always returns the calorie guidance first, followed by the
/// fixed advice in catalog order.
pub fn select(zone: BmiZone, tdee_kcal: i64) -> Vec<Recommendation> {
    let template = calorie_template(zone);
    let calorie_guidance = Recommendation {
        icon: Icon::Heart,
        title: template.title.to_owned(),
        description: template.description.replace("{tdee}", &tdee_kcal.to_string()),
        accent_color: template.accent_color.to_owned(),
    };

    std::iter::once(calorie_guidance)
        .chain(FIXED_ADVICE.iter().map(|advice| Recommendation {
            icon: advice.icon,
            title: advice.title.to_owned(),
            description: advice.description.to_owned(),
            accent_color: advice.accent_color.to_owned(),
        }))
        .collect()
}
