//! Enrollment handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_commons::{
    Enrollment, EnrollmentId, EnrollmentStatus, FarmerId, LandId, Role, SchemeId,
};
use agrareg_core::AppContext;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;

use super::{bad_request, not_found, require_role, require_user, storage_failure};

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub farmer_id: String,
    pub land_id: String,
    pub scheme_id: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// An enrollment annotated with display names for list views.
#[derive(Debug, Serialize)]
pub struct EnrollmentWithDetails {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_title: Option<String>,
}

/// GET /api/enrollments (admin|worker)
pub async fn list(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin, Role::Worker]) {
        return resp;
    }

    let enrollments = match ctx.enrollments.list_recent_async().await {
        Ok(enrollments) => enrollments,
        Err(e) => return storage_failure(&e),
    };
    let farmers = match ctx.farmers.list_recent_async().await {
        Ok(farmers) => farmers,
        Err(e) => return storage_failure(&e),
    };
    let schemes = match ctx.schemes.list_filtered_async(None, None).await {
        Ok(schemes) => schemes,
        Err(e) => return storage_failure(&e),
    };

    let farmer_names: HashMap<FarmerId, String> =
        farmers.into_iter().map(|f| (f.id, f.name)).collect();
    let scheme_titles: HashMap<SchemeId, String> =
        schemes.into_iter().map(|s| (s.id, s.title)).collect();

    let annotated: Vec<EnrollmentWithDetails> = enrollments
        .into_iter()
        .map(|enrollment| {
            let farmer_name = farmer_names.get(&enrollment.farmer_id).cloned();
            let scheme_title = scheme_titles.get(&enrollment.scheme_id).cloned();
            EnrollmentWithDetails {
                enrollment,
                farmer_name,
                scheme_title,
            }
        })
        .collect();

    HttpResponse::Ok().json(annotated)
}

/// POST /api/enrollments (admin|worker)
///
/// Validates the referenced records and checks the named parcel against the
/// scheme's per-land rules. Duplicate applications for the same combination
/// are allowed; the status workflow resolves them.
pub async fn apply(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<ApplyRequest>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin, Role::Worker]) {
        return resp;
    }

    let farmer = match ctx
        .farmers
        .get_async(FarmerId::new(payload.farmer_id.clone()))
        .await
    {
        Ok(Some(farmer)) => farmer,
        Ok(None) => return bad_request("Invalid farmer"),
        Err(e) => return storage_failure(&e),
    };
    let land = match ctx.lands.get_async(LandId::new(payload.land_id.clone())).await {
        Ok(Some(land)) => land,
        Ok(None) => return bad_request("Invalid land"),
        Err(e) => return storage_failure(&e),
    };
    let scheme = match ctx
        .schemes
        .get_async(SchemeId::new(payload.scheme_id.clone()))
        .await
    {
        Ok(Some(scheme)) => scheme,
        Ok(None) => return bad_request("Invalid scheme"),
        Err(e) => return storage_failure(&e),
    };

    if scheme.eligibility.min_land_area > 0.0
        && land.area_hectares < scheme.eligibility.min_land_area
    {
        return bad_request("Land area is less than required for this scheme");
    }
    if !scheme.eligibility.allowed_districts.is_empty() {
        let admitted = land
            .location
            .district
            .as_deref()
            .map(|d| scheme.eligibility.allowed_districts.iter().any(|a| a == d))
            .unwrap_or(false);
        if !admitted {
            return bad_request("Land district not eligible for this scheme");
        }
    }

    let now = Utc::now();
    let enrollment = Enrollment {
        id: EnrollmentId::generate(),
        farmer_id: farmer.id,
        land_id: land.id,
        scheme_id: scheme.id,
        status: EnrollmentStatus::Applied,
        remarks: payload.remarks.clone(),
        created_at: now,
        updated_at: now,
    };

    match ctx.enrollments.save_async(enrollment).await {
        Ok(enrollment) => HttpResponse::Created().json(json!({
            "message": "Enrollment successful",
            "enrollment": enrollment,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/enrollments/farmer/{farmer_id}
pub async fn by_farmer(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let farmer_id = FarmerId::new(path.into_inner());
    match ctx.farmers.get_async(farmer_id.clone()).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Farmer not found"),
        Err(e) => return storage_failure(&e),
    }

    match ctx.enrollments.list_by_farmer_async(farmer_id).await {
        Ok(enrollments) => HttpResponse::Ok().json(enrollments),
        Err(e) => storage_failure(&e),
    }
}

/// PUT /api/enrollments/{id}/status (admin|worker)
pub async fn update_status(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin, Role::Worker]) {
        return resp;
    }

    // Only the two decision states are reachable through this route; a
    // decided application cannot go back to "applied".
    let status = match EnrollmentStatus::from_str(&payload.status) {
        Ok(EnrollmentStatus::Approved) => EnrollmentStatus::Approved,
        Ok(EnrollmentStatus::Rejected) => EnrollmentStatus::Rejected,
        _ => return bad_request("Invalid status"),
    };

    let mut enrollment = match ctx
        .enrollments
        .get_async(EnrollmentId::new(path.into_inner()))
        .await
    {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => return not_found("Enrollment not found"),
        Err(e) => return storage_failure(&e),
    };

    enrollment.status = status;
    if payload.remarks.is_some() {
        enrollment.remarks = payload.remarks.clone();
    }
    enrollment.updated_at = Utc::now();

    match ctx.enrollments.save_async(enrollment).await {
        Ok(enrollment) => HttpResponse::Ok().json(json!({
            "message": "Enrollment status updated successfully",
            "enrollment": enrollment,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// DELETE /api/enrollments/{id} (admin)
pub async fn delete(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin]) {
        return resp;
    }

    let id = EnrollmentId::new(path.into_inner());
    match ctx.enrollments.get_async(id.clone()).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Enrollment not found"),
        Err(e) => return storage_failure(&e),
    }

    match ctx.enrollments.delete_async(id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Enrollment deleted successfully" })),
        Err(e) => storage_failure(&e),
    }
}
