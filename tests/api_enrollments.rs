//! Enrollment workflow integration tests.

mod common;

use actix_web::test;
use agrareg_commons::{
    Farmer, FarmerId, Land, LandId, LandLocation, Role, Scheme, SchemeEligibility, SchemeId,
};
use agrareg_core::AppContext;
use agrareg_store::EntityStore;
use chrono::Utc;
use common::{bearer, init_app, seed_user, test_context};
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    farmer: Farmer,
    land: Land,
    scheme: Scheme,
}

fn seed(ctx: &Arc<AppContext>, area: f64, district: Option<&str>, min: f64, allowed: &[&str]) -> Fixture {
    let now = Utc::now();
    let farmer = Farmer {
        id: FarmerId::generate(),
        name: "Ramesh".to_string(),
        phone: "9000000000".to_string(),
        aadhar: None,
        address: Default::default(),
        created_by: None,
        verified: Default::default(),
        created_at: now,
        updated_at: now,
    };
    ctx.farmers.put(&farmer.id.clone(), &farmer).unwrap();

    let land = Land {
        id: LandId::generate(),
        farmer_id: farmer.id.clone(),
        survey_number: "SN-7".to_string(),
        area_hectares: area,
        crop_type: Some("wheat".to_string()),
        irrigation_type: None,
        location: LandLocation {
            village: None,
            district: district.map(|d| d.to_string()),
            state: None,
        },
        created_at: now,
        updated_at: now,
    };
    ctx.lands.put(&land.id.clone(), &land).unwrap();

    let scheme = Scheme {
        id: SchemeId::generate(),
        title: "Crop Support".to_string(),
        scheme_code: "CS-1".to_string(),
        description: String::new(),
        benefits: String::new(),
        eligibility: SchemeEligibility {
            min_land_area: min,
            max_land_area: 0.0,
            allowed_districts: allowed.iter().map(|d| d.to_string()).collect(),
        },
        application_deadline: None,
        is_active: true,
        created_by: None,
        updated_by: None,
        created_at: now,
        updated_at: now,
    };
    ctx.schemes.put(&scheme.id.clone(), &scheme).unwrap();

    Fixture {
        farmer,
        land,
        scheme,
    }
}

fn apply_payload(f: &Fixture) -> serde_json::Value {
    json!({
        "farmer_id": f.farmer.id,
        "land_id": f.land.id,
        "scheme_id": f.scheme.id,
    })
}

#[actix_web::test]
async fn test_apply_creates_applied_enrollment() {
    let ctx = test_context();
    let app = init_app(ctx.clone()).await;
    let (_, token) = seed_user(&ctx, "worker1", Role::Worker);
    let fixture = seed(&ctx, 3.0, Some("Pune"), 2.0, &["Pune"]);

    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&token))
        .set_json(apply_payload(&fixture))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Enrollment successful");
    assert_eq!(body["enrollment"]["status"], "applied");
}

#[actix_web::test]
async fn test_apply_validates_references() {
    let ctx = test_context();
    let app = init_app(ctx.clone()).await;
    let (_, token) = seed_user(&ctx, "worker1", Role::Worker);
    let fixture = seed(&ctx, 3.0, Some("Pune"), 0.0, &[]);

    let cases = [
        (
            json!({ "farmer_id": "missing", "land_id": fixture.land.id, "scheme_id": fixture.scheme.id }),
            "Invalid farmer",
        ),
        (
            json!({ "farmer_id": fixture.farmer.id, "land_id": "missing", "scheme_id": fixture.scheme.id }),
            "Invalid land",
        ),
        (
            json!({ "farmer_id": fixture.farmer.id, "land_id": fixture.land.id, "scheme_id": "missing" }),
            "Invalid scheme",
        ),
    ];

    for (payload, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(&token))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], message);
    }
}

#[actix_web::test]
async fn test_apply_checks_land_against_scheme_rules() {
    let ctx = test_context();
    let app = init_app(ctx.clone()).await;
    let (_, token) = seed_user(&ctx, "worker1", Role::Worker);

    // Parcel smaller than the scheme floor
    let small = seed(&ctx, 1.0, Some("Pune"), 2.0, &[]);
    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&token))
        .set_json(apply_payload(&small))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Land area is less than required for this scheme");

    // Parcel outside the allowed districts
    let ctx2 = test_context();
    let app2 = init_app(ctx2.clone()).await;
    let (_, token2) = seed_user(&ctx2, "worker1", Role::Worker);
    let elsewhere = seed(&ctx2, 5.0, Some("Nagpur"), 0.0, &["Pune"]);
    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&token2))
        .set_json(apply_payload(&elsewhere))
        .to_request();
    let resp = test::call_service(&app2, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Land district not eligible for this scheme");

    // Parcel with no recorded district fails a restricted scheme too
    let ctx3 = test_context();
    let app3 = init_app(ctx3.clone()).await;
    let (_, token3) = seed_user(&ctx3, "worker1", Role::Worker);
    let nowhere = seed(&ctx3, 5.0, None, 0.0, &["Pune"]);
    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&token3))
        .set_json(apply_payload(&nowhere))
        .to_request();
    let resp = test::call_service(&app3, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_status_update_workflow() {
    let ctx = test_context();
    let app = init_app(ctx.clone()).await;
    let (_, token) = seed_user(&ctx, "worker1", Role::Worker);
    let fixture = seed(&ctx, 3.0, Some("Pune"), 0.0, &[]);

    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&token))
        .set_json(apply_payload(&fixture))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["enrollment"]["id"].as_str().unwrap().to_string();

    // "applied" is not a decision
    let req = test::TestRequest::put()
        .uri(&format!("/api/enrollments/{}/status", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "status": "applied" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid status");

    let req = test::TestRequest::put()
        .uri(&format!("/api/enrollments/{}/status", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "status": "approved", "remarks": "Verified on site" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["enrollment"]["status"], "approved");
    assert_eq!(body["enrollment"]["remarks"], "Verified on site");
}

#[actix_web::test]
async fn test_delete_is_admin_only_and_list_annotates() {
    let ctx = test_context();
    let app = init_app(ctx.clone()).await;
    let (_, worker) = seed_user(&ctx, "worker1", Role::Worker);
    let (_, admin) = seed_user(&ctx, "admin1", Role::Admin);
    let fixture = seed(&ctx, 3.0, Some("Pune"), 0.0, &[]);

    let req = test::TestRequest::post()
        .uri("/api/enrollments")
        .insert_header(bearer(&worker))
        .set_json(apply_payload(&fixture))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["enrollment"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/enrollments")
        .insert_header(bearer(&worker))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["farmer_name"], "Ramesh");
    assert_eq!(listed["scheme_title"], "Crop Support");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/enrollments/{}", id))
        .insert_header(bearer(&worker))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/enrollments/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/enrollments/farmer/{}", fixture.farmer.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}
