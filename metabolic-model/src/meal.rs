use std::{iter::Sum, ops::Add};

/// Macronutrients in grams.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Macros {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Macros {
    const fn new(protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            protein,
            fat,
            carbs,
        }
    }

    /// Totals rounded to a tenth of a gram.
    pub fn rounded(&self) -> Self {
        let round = |grams: f64| (grams * 10.0).round() / 10.0;
        Self::new(round(self.protein), round(self.fat), round(self.carbs))
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros::new(
            self.protein + other.protein,
            self.fat + other.fat,
            self.carbs + other.carbs,
        )
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::default(), Add::add)
    }
}

impl<'a> Sum<&'a FoodItem> for Macros {
    fn sum<I: Iterator<Item = &'a FoodItem>>(iter: I) -> Macros {
        iter.map(|item| item.macros).sum()
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FoodItem {
    pub id: u32,
    pub name: &'static str,
    pub macros: Macros,
}

static FOOD_CATALOG: [FoodItem; 15] = [
    FoodItem { id: 1, name: "Chicken Breast", macros: Macros::new(31.0, 3.6, 0.0) },
    FoodItem { id: 2, name: "Brown Rice", macros: Macros::new(2.6, 0.9, 23.0) },
    FoodItem { id: 3, name: "Broccoli", macros: Macros::new(2.8, 0.4, 6.6) },
    FoodItem { id: 4, name: "Eggs", macros: Macros::new(6.3, 5.3, 0.6) },
    FoodItem { id: 5, name: "Salmon", macros: Macros::new(25.0, 13.0, 0.0) },
    FoodItem { id: 6, name: "Sweet Potato", macros: Macros::new(2.0, 0.2, 20.2) },
    FoodItem { id: 7, name: "Almonds", macros: Macros::new(21.0, 49.0, 22.0) },
    FoodItem { id: 8, name: "Greek Yogurt", macros: Macros::new(10.0, 4.0, 6.0) },
    FoodItem { id: 9, name: "Banana", macros: Macros::new(1.3, 0.3, 27.0) },
    FoodItem { id: 10, name: "Oats", macros: Macros::new(13.0, 6.9, 66.0) },
    FoodItem { id: 11, name: "Spinach", macros: Macros::new(2.9, 0.4, 3.6) },
    FoodItem { id: 12, name: "Quinoa", macros: Macros::new(4.1, 1.9, 21.0) },
    FoodItem { id: 13, name: "Tofu", macros: Macros::new(8.0, 4.8, 1.9) },
    FoodItem { id: 14, name: "Berries", macros: Macros::new(1.0, 0.3, 14.0) },
    FoodItem { id: 15, name: "Pasta", macros: Macros::new(5.0, 1.1, 29.0) },
];

pub fn catalog() -> &'static [FoodItem] {
    &FOOD_CATALOG
}

pub fn find_food(id: u32) -> Option<&'static FoodItem> {
    FOOD_CATALOG.iter().find(|item| item.id == id)
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("unknown food item {0}")]
pub struct UnknownFood(pub u32);

/// Selected catalog items, in the order they were added. The same item may
/// appear more than once.
#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MealPlan {
    pub items: Vec<&'static FoodItem>,
    pub totals: Macros,
}

impl MealPlan {
    pub fn from_ids(ids: &[u32]) -> Result<Self, UnknownFood> {
        let items = ids
            .iter()
            .map(|&id| find_food(id).ok_or(UnknownFood(id)))
            .collect::<Result<Vec<_>, _>>()?;
        let totals = total_macros(items.iter().copied()).rounded();
        Ok(Self { items, totals })
    }
}

/// Sum of the items' macros, unrounded.
pub fn total_macros<'a>(items: impl IntoIterator<Item = &'a FoodItem>) -> Macros {
    items.into_iter().sum()
}
