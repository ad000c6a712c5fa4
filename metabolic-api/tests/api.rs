use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use chrono::{NaiveDate, TimeZone, Utc};
use metabolic_api::routes;
use metabolic_model::{
    ActivityLevel, Gender, Measurement, MeasurementUpdate, NewMeasurement, Profile,
};
use metabolic_store::{
    measurement::{MeasurementRepository, MockMeasurementRepository},
    profile::{MockProfileRepository, ProfileRepository},
    StoreError,
};
use mockall::predicate::eq;
use serde_json::{json, Value};

fn app(
    measurements: MockMeasurementRepository,
    profiles: MockProfileRepository,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let measurements: Arc<dyn MeasurementRepository> = Arc::new(measurements);
    let profiles: Arc<dyn ProfileRepository> = Arc::new(profiles);
    App::new()
        .app_data(web::Data::from(measurements))
        .app_data(web::Data::from(profiles))
        .configure(routes::configure)
}

fn measurement(id: &str, weight: f64) -> Measurement {
    Measurement {
        id: id.to_owned(),
        date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        data: NewMeasurement {
            weight,
            height: 175.0,
            waist: None,
            hip: None,
            age: 30.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            bmi: 22.9,
            bmr: 1649,
            tdee: 2556,
            body_fat_percentage: None,
            notes: None,
        },
    }
}

#[actix_web::test]
async fn calculate_reference_input() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "height": 175,
            "weight": 70,
            "age": 30,
            "gender": "male",
            "activityLevel": "moderate"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["bmi"], json!(22.9));
    assert_eq!(body["bmiZone"], json!({ "label": "Norma", "color": "#27AE60" }));
    assert_eq!(body["bmr"], json!(1649));
    assert_eq!(body["tdee"], json!(2556));
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["recommendations"][0]["icon"], json!("heart"));
}

#[actix_web::test]
async fn calculate_rejects_out_of_range_fields() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "height": 90,
            "weight": 70,
            "age": 10,
            "gender": "male",
            "activityLevel": "light"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid input data"));
    assert!(body["fields"]["height"].is_string());
    assert!(body["fields"]["age"].is_string());
    assert!(body["fields"].get("weight").is_none());
}

#[actix_web::test]
async fn calculate_rejects_malformed_body() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let test_data = [
        json!({ "height": "tall", "weight": 70, "age": 30, "gender": "male" }),
        json!({ "height": 175, "weight": 70, "age": 30, "gender": "other" }),
        json!([]),
    ];

    for (i, payload) in test_data.into_iter().enumerate() {
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "Test case #{}", i);
    }
}

#[actix_web::test]
async fn calculate_defaults_unknown_activity_to_sedentary() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/calculate")
        .set_json(json!({
            "height": 175,
            "weight": 70,
            "age": 30,
            "gender": "female",
            "activityLevel": "extreme"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    // 1482.75 * 1.2
    assert_eq!(body["bmr"], json!(1483));
    assert_eq!(body["tdee"], json!(1779));
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], json!("ok"));
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn list_measurements_with_and_without_limit() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_fetch_measurements()
        .times(1)
        .returning(|| Ok(vec![measurement("a", 70.0), measurement("b", 71.0)]));
    repository
        .expect_fetch_recent()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(vec![measurement("b", 71.0)]));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::get().uri("/api/measurements").to_request();
    let all: Vec<Measurement> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/measurements?limit=1")
        .to_request();
    let recent: Vec<Measurement> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recent, vec![measurement("b", 71.0)]);
}

#[actix_web::test]
async fn store_measurement_returns_created_record() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_store_measurement()
        .times(1)
        .returning(|data| {
            Ok(Measurement {
                id: "new".to_owned(),
                date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
                data,
            })
        });
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/measurements")
        .set_json(&measurement("ignored", 80.0).data)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let stored: Measurement = test::read_body_json(resp).await;
    assert_eq!(stored.id, "new");
    assert_eq!(stored.data.weight, 80.0);
}

#[actix_web::test]
async fn get_measurement_found_and_missing() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_fetch_measurement()
        .returning(|id| Ok((id == "a").then(|| measurement("a", 70.0))));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::get().uri("/api/measurements/a").to_request();
    let found: Measurement = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.id, "a");

    let req = test::TestRequest::get().uri("/api/measurements/x").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_measurement_applies_patch() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_update_measurement()
        .returning(|id, update| {
            if id != "a" {
                return Ok(None);
            }
            let mut measurement = measurement("a", 70.0);
            measurement.apply(update);
            Ok(Some(measurement))
        });
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::patch()
        .uri("/api/measurements/a")
        .set_json(json!({ "weight": 68.5, "notes": "po urlopie" }))
        .to_request();
    let updated: Measurement = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.data.weight, 68.5);
    assert_eq!(updated.data.notes.as_deref(), Some("po urlopie"));

    let req = test::TestRequest::patch()
        .uri("/api/measurements/x")
        .set_json(MeasurementUpdate::default())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_measurement_and_clear() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_delete_measurement()
        .returning(|id| Ok(id == "a"));
    repository.expect_clear().times(1).returning(|| Ok(()));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let test_data = [
        ("/api/measurements/a", StatusCode::NO_CONTENT),
        ("/api/measurements/x", StatusCode::NOT_FOUND),
        ("/api/measurements", StatusCode::NO_CONTENT),
    ];

    for (i, (uri, status)) in test_data.into_iter().enumerate() {
        let req = test::TestRequest::delete().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status, "Test case #{}", i);
    }
}

#[actix_web::test]
async fn export_is_not_treated_as_an_id() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_fetch_measurements()
        .returning(|| Ok(vec![measurement("a", 70.0)]));
    repository.expect_fetch_measurement().never();
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/measurements/export")
        .to_request();
    let exported: Vec<Measurement> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(exported, vec![measurement("a", 70.0)]);
}

#[actix_web::test]
async fn import_replaces_history() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_replace_all()
        .withf(|measurements| measurements.len() == 2)
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let payload = serde_json::to_string(&vec![measurement("a", 70.0), measurement("b", 71.0)])
        .unwrap();
    let req = test::TestRequest::post()
        .uri("/api/measurements/import")
        .set_payload(payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "imported": 2 }));
}

#[actix_web::test]
async fn import_rejects_non_array() {
    let mut repository = MockMeasurementRepository::new();
    repository.expect_replace_all().never();
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/measurements/import")
        .set_payload(r#"{"id": "a"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn store_failure_is_internal_error() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_fetch_measurements()
        .returning(|| Err(StoreError::MalformedRecord("unknown gender".to_owned())));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let req = test::TestRequest::get().uri("/api/measurements").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[actix_web::test]
async fn profile_round_trip() {
    let profile = Profile {
        height: 168.0,
        gender: Gender::Female,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
    };

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_fetch_profile()
        .times(1)
        .returning(|| Ok(None));
    profiles
        .expect_store_profile()
        .with(eq(profile.clone()))
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(app(MockMeasurementRepository::new(), profiles)).await;

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/profile")
        .set_json(json!({ "height": 168.0, "gender": "female", "dateOfBirth": "1990-05-17" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["age"].as_u64().is_some_and(|age| age >= 35));
    let stored: Profile = serde_json::from_value(body).unwrap();
    assert_eq!(stored, profile);
}

#[actix_web::test]
async fn calculate_tolerates_invalid_activity_level_type() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let test_data = [json!(null), json!(3), json!(["active"])];

    for (i, activity_level) in test_data.into_iter().enumerate() {
        let req = test::TestRequest::post()
            .uri("/api/calculate")
            .set_json(json!({
                "height": 175,
                "weight": 70,
                "age": 30,
                "gender": "female",
                "activityLevel": activity_level
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "Test case #{}", i);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["tdee"], json!(1779), "Test case #{}", i);
    }
}

#[actix_web::test]
async fn import_accepts_spaced_very_active_key() {
    let mut repository = MockMeasurementRepository::new();
    repository
        .expect_replace_all()
        .withf(|measurements| {
            measurements.len() == 1
                && measurements[0].id == "1709280000000"
                && measurements[0].data.activity_level == ActivityLevel::VeryActive
        })
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(app(repository, MockProfileRepository::new())).await;

    let payload = json!([{
        "id": "1709280000000",
        "date": "2024-03-01T08:00:00.000Z",
        "weight": 70,
        "height": 175,
        "waist": 82,
        "hip": 95,
        "age": 30,
        "gender": "male",
        "activityLevel": "very active",
        "bmi": 22.9,
        "bmr": 1649,
        "tdee": 3133,
        "bodyFatPercentage": 14.2
    }]);
    let req = test::TestRequest::post()
        .uri("/api/measurements/import")
        .set_payload(payload.to_string())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "imported": 1 }));
}

#[actix_web::test]
async fn activity_levels_are_listed_in_order() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/api/activity-levels")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let levels: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|level| level["level"].as_str())
        .collect();
    assert_eq!(
        levels,
        vec!["sedentary", "light", "moderate", "active", "very_active"]
    );
    assert_eq!(body[4]["multiplier"], json!(1.9));
    assert_eq!(body[0]["label"], json!("Siedzący"));
}

#[actix_web::test]
async fn meal_plan_sums_selected_foods() {
    let app = test::init_service(app(
        MockMeasurementRepository::new(),
        MockProfileRepository::new(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/foods").to_request();
    let foods: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(foods.as_array().map(Vec::len), Some(15));
    assert_eq!(foods[0]["name"], json!("Chicken Breast"));

    let req = test::TestRequest::post()
        .uri("/api/meal-plan")
        .set_json(json!({ "items": [1, 2, 3, 1] }))
        .to_request();
    let plan: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(plan["items"].as_array().map(Vec::len), Some(4));
    assert_eq!(
        plan["totals"],
        json!({ "protein": 67.4, "fat": 8.5, "carbs": 29.6 })
    );

    let req = test::TestRequest::post()
        .uri("/api/meal-plan")
        .set_json(json!({ "items": [1, 42] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("unknown food item 42"));
}
