use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use log::{debug, info};
use metabolic_model::{
    meal, validate_request, ActivityLevel, CalculateRequest, MealPlan, MeasurementUpdate,
    NewMeasurement, Profile,
};
use metabolic_store::{
    measurement::MeasurementRepository, profile::ProfileRepository, transfer,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

type Measurements = web::Data<dyn MeasurementRepository>;
type Profiles = web::Data<dyn ProfileRepository>;

#[post("/api/calculate")]
async fn calculate(request: web::Json<CalculateRequest>) -> Result<impl Responder, ApiError> {
    let input = validate_request(&request)?;
    let result = metabolic_model::calculate(&input);
    debug!(
        "Calculated BMI {} ({}), BMR {}, TDEE {}",
        result.bmi,
        result.bmi_zone.label(),
        result.bmr,
        result.tdee
    );
    Ok(web::Json(result))
}

#[get("/api/health")]
async fn health() -> impl Responder {
    web::Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

#[get("/api/activity-levels")]
async fn activity_levels() -> impl Responder {
    web::Json(ActivityLevel::profiles())
}

#[get("/api/foods")]
async fn foods() -> impl Responder {
    web::Json(meal::catalog())
}

#[derive(Deserialize)]
struct MealPlanRequest {
    items: Vec<u32>,
}

#[post("/api/meal-plan")]
async fn meal_plan(request: web::Json<MealPlanRequest>) -> Result<impl Responder, ApiError> {
    let plan = MealPlan::from_ids(&request.items)?;
    Ok(web::Json(plan))
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

#[get("/api/measurements")]
async fn list_measurements(
    repository: Measurements,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, ApiError> {
    let measurements = match query.limit {
        Some(limit) => repository.fetch_recent(limit).await?,
        None => repository.fetch_measurements().await?,
    };
    Ok(web::Json(measurements))
}

#[post("/api/measurements")]
async fn store_measurement(
    repository: Measurements,
    measurement: web::Json<NewMeasurement>,
) -> Result<impl Responder, ApiError> {
    let measurement = repository.store_measurement(measurement.into_inner()).await?;
    info!("Stored measurement {}", measurement.id);
    Ok(HttpResponse::Created().json(measurement))
}

#[delete("/api/measurements")]
async fn clear_measurements(repository: Measurements) -> Result<impl Responder, ApiError> {
    repository.clear().await?;
    info!("Cleared measurement history");
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/measurements/export")]
async fn export_measurements(repository: Measurements) -> Result<impl Responder, ApiError> {
    let json = transfer::export(repository.get_ref()).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(json))
}

#[post("/api/measurements/import")]
async fn import_measurements(
    repository: Measurements,
    body: String,
) -> Result<impl Responder, ApiError> {
    let imported = transfer::import(repository.get_ref(), &body).await?;
    Ok(web::Json(json!({ "imported": imported })))
}

#[get("/api/measurements/{id}")]
async fn get_measurement(
    repository: Measurements,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let measurement = repository
        .fetch_measurement(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(web::Json(measurement))
}

#[patch("/api/measurements/{id}")]
async fn update_measurement(
    repository: Measurements,
    id: web::Path<String>,
    update: web::Json<MeasurementUpdate>,
) -> Result<impl Responder, ApiError> {
    let measurement = repository
        .update_measurement(&id, update.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(web::Json(measurement))
}

#[delete("/api/measurements/{id}")]
async fn delete_measurement(
    repository: Measurements,
    id: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    if !repository.delete_measurement(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!("Deleted measurement {}", id);
    Ok(HttpResponse::NoContent().finish())
}

/// Stored profile plus the age it implies today.
#[derive(Serialize)]
struct ProfileResponse {
    #[serde(flatten)]
    profile: Profile,
    age: u32,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let age = profile.age_on(Utc::now().date_naive());
        Self { profile, age }
    }
}

#[get("/api/profile")]
async fn get_profile(repository: Profiles) -> Result<impl Responder, ApiError> {
    let profile = repository.fetch_profile().await?.ok_or(ApiError::NotFound)?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

#[put("/api/profile")]
async fn put_profile(
    repository: Profiles,
    profile: web::Json<Profile>,
) -> Result<impl Responder, ApiError> {
    let profile = profile.into_inner();
    repository.store_profile(profile.clone()).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Registers every endpoint. The repositories must be provided as
/// `web::Data<dyn MeasurementRepository>` and `web::Data<dyn ProfileRepository>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::InvalidPayload(err.to_string()).into()),
    )
    .service(calculate)
    .service(health)
    .service(activity_levels)
    .service(foods)
    .service(meal_plan)
    .service(export_measurements)
    .service(import_measurements)
    .service(list_measurements)
    .service(store_measurement)
    .service(clear_measurements)
    .service(get_measurement)
    .service(update_measurement)
    .service(delete_measurement)
    .service(get_profile)
    .service(put_profile);
}
