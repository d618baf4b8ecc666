//! Scheme handlers, including the eligibility endpoint.

use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_commons::{FarmerId, Role, Scheme, SchemeEligibility, SchemeId};
use agrareg_core::{evaluate_eligibility, AppContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::json;

use super::{bad_request, not_found, require_role, require_user, storage_failure};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 200;

#[derive(Debug, Deserialize)]
pub struct CreateSchemeRequest {
    pub title: String,
    pub scheme_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub eligibility: Option<SchemeEligibility>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSchemeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scheme_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub eligibility: Option<SchemeEligibility>,
    /// Absent leaves the deadline unchanged; an explicit `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub application_deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Wraps a deserialized value so a field that was present (even as `null`)
/// can be told apart from one that was omitted.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct SchemeListQuery {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// Validates and normalizes a scheme title.
fn check_title(title: &str) -> Result<String, HttpResponse> {
    let title = title.trim();
    let length = title.chars().count();
    if length < TITLE_MIN || length > TITLE_MAX {
        return Err(bad_request("Title must be between 3 and 200 characters"));
    }
    Ok(title.to_string())
}

/// Uppercases a scheme code and checks its charset (`A-Z`, `0-9`, `-`).
fn check_code(code: &str) -> Result<String, HttpResponse> {
    let code = code.trim().to_ascii_uppercase();
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(bad_request(
            "Scheme code must contain only letters, numbers and hyphens",
        ));
    }
    Ok(code)
}

/// Rejects bounds where both are set (> 0) and the floor exceeds the
/// ceiling. Zero stays a valid "unset" sentinel on either side.
fn check_bounds(eligibility: &SchemeEligibility) -> Result<(), HttpResponse> {
    if eligibility.min_land_area > 0.0
        && eligibility.max_land_area > 0.0
        && eligibility.min_land_area > eligibility.max_land_area
    {
        return Err(bad_request(
            "Minimum land area cannot exceed maximum land area",
        ));
    }
    Ok(())
}

/// POST /api/schemes (any authenticated user)
pub async fn create(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<CreateSchemeRequest>,
) -> HttpResponse {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let title = match check_title(&payload.title) {
        Ok(title) => title,
        Err(resp) => return resp,
    };
    let scheme_code = match check_code(&payload.scheme_code) {
        Ok(code) => code,
        Err(resp) => return resp,
    };
    let eligibility = payload.eligibility.clone().unwrap_or_default();
    if let Err(resp) = check_bounds(&eligibility) {
        return resp;
    }

    match ctx.schemes.find_by_code_async(scheme_code.clone(), None).await {
        Ok(Some(_)) => return bad_request("Scheme code already exists"),
        Ok(None) => {}
        Err(e) => return storage_failure(&e),
    }

    let now = Utc::now();
    let scheme = Scheme {
        id: SchemeId::generate(),
        title,
        scheme_code,
        description: payload.description.clone().unwrap_or_default(),
        benefits: payload.benefits.clone().unwrap_or_default(),
        eligibility,
        application_deadline: payload.application_deadline,
        is_active: payload.is_active.unwrap_or(true),
        created_by: Some(user.user_id),
        updated_by: None,
        created_at: now,
        updated_at: now,
    };

    match ctx.schemes.save_async(scheme).await {
        Ok(scheme) => HttpResponse::Created().json(json!({
            "message": "Scheme created successfully",
            "scheme": scheme,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/schemes?active=&district=
pub async fn list(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<SchemeListQuery>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let active = match query.active.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };

    match ctx
        .schemes
        .list_filtered_async(active, query.district.clone())
        .await
    {
        Ok(schemes) => HttpResponse::Ok().json(schemes),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/schemes/{id}
pub async fn get(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }
    match ctx.schemes.get_async(SchemeId::new(path.into_inner())).await {
        Ok(Some(scheme)) => HttpResponse::Ok().json(scheme),
        Ok(None) => not_found("Scheme not found"),
        Err(e) => storage_failure(&e),
    }
}

/// PUT /api/schemes/{id} (admin)
pub async fn update(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<UpdateSchemeRequest>,
) -> HttpResponse {
    let user = match require_role(&req, &[Role::Admin]) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let mut scheme = match ctx.schemes.get_async(SchemeId::new(path.into_inner())).await {
        Ok(Some(scheme)) => scheme,
        Ok(None) => return not_found("Scheme not found"),
        Err(e) => return storage_failure(&e),
    };

    if let Some(title) = &payload.title {
        match check_title(title) {
            Ok(title) => scheme.title = title,
            Err(resp) => return resp,
        }
    }

    if let Some(code) = &payload.scheme_code {
        let code = match check_code(code) {
            Ok(code) => code,
            Err(resp) => return resp,
        };
        // "Already exists" must not match the scheme being updated.
        match ctx
            .schemes
            .find_by_code_async(code.clone(), Some(scheme.id.clone()))
            .await
        {
            Ok(Some(_)) => return bad_request("Scheme code already exists"),
            Ok(None) => scheme.scheme_code = code,
            Err(e) => return storage_failure(&e),
        }
    }

    if let Some(description) = &payload.description {
        scheme.description = description.clone();
    }
    if let Some(benefits) = &payload.benefits {
        scheme.benefits = benefits.clone();
    }
    if let Some(eligibility) = &payload.eligibility {
        if let Err(resp) = check_bounds(eligibility) {
            return resp;
        }
        scheme.eligibility = eligibility.clone();
    }
    if let Some(deadline) = payload.application_deadline {
        scheme.application_deadline = deadline;
    }
    if let Some(active) = payload.is_active {
        scheme.is_active = active;
    }

    scheme.updated_by = Some(user.user_id);
    scheme.updated_at = Utc::now();

    match ctx.schemes.save_async(scheme).await {
        Ok(scheme) => HttpResponse::Ok().json(json!({
            "message": "Scheme updated successfully",
            "scheme": scheme,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// DELETE /api/schemes/{id} (admin)
pub async fn delete(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin]) {
        return resp;
    }

    let id = SchemeId::new(path.into_inner());
    match ctx.schemes.get_async(id.clone()).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Scheme not found"),
        Err(e) => return storage_failure(&e),
    }

    match ctx.schemes.delete_async(id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Scheme deleted successfully" })),
        Err(e) => storage_failure(&e),
    }
}

/// PATCH /api/schemes/{id}/toggle-status (admin)
pub async fn toggle_status(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    let user = match require_role(&req, &[Role::Admin]) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let mut scheme = match ctx.schemes.get_async(SchemeId::new(path.into_inner())).await {
        Ok(Some(scheme)) => scheme,
        Ok(None) => return not_found("Scheme not found"),
        Err(e) => return storage_failure(&e),
    };

    scheme.is_active = !scheme.is_active;
    scheme.updated_by = Some(user.user_id);
    scheme.updated_at = Utc::now();

    let verb = if scheme.is_active {
        "activated"
    } else {
        "deactivated"
    };

    match ctx.schemes.save_async(scheme).await {
        Ok(scheme) => HttpResponse::Ok().json(json!({
            "message": format!("Scheme {} successfully", verb),
            "scheme": scheme,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/schemes/eligible/{farmer_id}
///
/// Evaluates the active scheme catalog against the farmer's holdings at the
/// current instant. An empty result is a normal outcome.
pub async fn eligible(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let farmer_id = FarmerId::new(path.into_inner());
    let farmer = match ctx.farmers.get_async(farmer_id.clone()).await {
        Ok(Some(farmer)) => farmer,
        Ok(None) => return not_found("Farmer not found"),
        Err(e) => return storage_failure(&e),
    };

    let lands = match ctx.lands.list_by_farmer_async(farmer_id).await {
        Ok(lands) => lands,
        Err(e) => return storage_failure(&e),
    };
    let catalog = match ctx.schemes.active_catalog_async().await {
        Ok(catalog) => catalog,
        Err(e) => return storage_failure(&e),
    };

    let report = evaluate_eligibility(&lands, &catalog, Utc::now());

    HttpResponse::Ok().json(json!({
        "farmer": {
            "id": farmer.id,
            "name": farmer.name,
            "total_land_area": report.total_land_area,
            "districts": report.farmer_districts,
        },
        "total_eligible_schemes": report.eligible_schemes.len(),
        "eligible_schemes": report.eligible_schemes,
    }))
}
