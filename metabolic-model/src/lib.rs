pub mod input;
pub mod meal;
pub mod measurement;
pub mod metrics;
pub mod recommendation;
pub mod result;
pub mod validation;
pub mod zone;

pub use input::{ActivityLevel, ActivityProfile, BiometricInput, CalculateRequest, Gender, RawBiometricInput};
pub use meal::{FoodItem, Macros, MealPlan, UnknownFood};
pub use measurement::{Measurement, MeasurementUpdate, NewMeasurement, Profile};
pub use recommendation::{Icon, Recommendation};
pub use result::{calculate, MetabolicResult, SecondaryIndices};
pub use validation::{validate, validate_request, Field, ValidationErrors};
pub use zone::BmiZone;
