//! Land parcel handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_commons::{FarmerId, Land, LandId, LandLocation};
use agrareg_core::AppContext;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

use super::{bad_request, not_found, require_user, storage_failure};

#[derive(Debug, Deserialize)]
pub struct CreateLandRequest {
    pub farmer_id: String,
    pub survey_number: String,
    pub area_hectares: f64,
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub irrigation_type: Option<String>,
    #[serde(default)]
    pub location: Option<LandLocation>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLandRequest {
    #[serde(default)]
    pub survey_number: Option<String>,
    #[serde(default)]
    pub area_hectares: Option<f64>,
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub irrigation_type: Option<String>,
    #[serde(default)]
    pub location: Option<LandLocation>,
}

/// A land parcel annotated with its owner's name for list views.
#[derive(Debug, Serialize)]
pub struct LandWithFarmer {
    #[serde(flatten)]
    pub land: Land,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer_name: Option<String>,
}

/// GET /api/lands
pub async fn list(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let lands = match ctx.lands.list_recent_async().await {
        Ok(lands) => lands,
        Err(e) => return storage_failure(&e),
    };
    let farmers = match ctx.farmers.list_recent_async().await {
        Ok(farmers) => farmers,
        Err(e) => return storage_failure(&e),
    };

    let names: HashMap<FarmerId, String> = farmers
        .into_iter()
        .map(|f| (f.id, f.name))
        .collect();

    let annotated: Vec<LandWithFarmer> = lands
        .into_iter()
        .map(|land| {
            let farmer_name = names.get(&land.farmer_id).cloned();
            LandWithFarmer { land, farmer_name }
        })
        .collect();

    HttpResponse::Ok().json(annotated)
}

/// POST /api/lands
pub async fn create(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<CreateLandRequest>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let survey_number = payload.survey_number.trim().to_string();
    if survey_number.is_empty() {
        return bad_request("Survey number is required");
    }
    if payload.area_hectares < 0.0 {
        return bad_request("Land area must be non-negative");
    }

    let farmer_id = FarmerId::new(payload.farmer_id.clone());
    match ctx.farmers.get_async(farmer_id.clone()).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Farmer not found"),
        Err(e) => return storage_failure(&e),
    }

    let now = Utc::now();
    let land = Land {
        id: LandId::generate(),
        farmer_id,
        survey_number,
        area_hectares: payload.area_hectares,
        crop_type: payload.crop_type.clone(),
        irrigation_type: payload.irrigation_type.clone(),
        location: payload.location.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    match ctx.lands.save_async(land).await {
        Ok(land) => HttpResponse::Created().json(json!({
            "message": "Land record created successfully",
            "land": land,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/lands/farmer/{farmer_id}
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

    match ctx.lands.list_by_farmer_async(farmer_id).await {
        Ok(lands) => HttpResponse::Ok().json(lands),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/lands/{id}
pub async fn get(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }
    match ctx.lands.get_async(LandId::new(path.into_inner())).await {
        Ok(Some(land)) => HttpResponse::Ok().json(land),
        Ok(None) => not_found("Land not found"),
        Err(e) => storage_failure(&e),
    }
}

/// PUT /api/lands/{id}
pub async fn update(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<UpdateLandRequest>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let mut land = match ctx.lands.get_async(LandId::new(path.into_inner())).await {
        Ok(Some(land)) => land,
        Ok(None) => return not_found("Land not found"),
        Err(e) => return storage_failure(&e),
    };

    if let Some(survey_number) = &payload.survey_number {
        let survey_number = survey_number.trim();
        if survey_number.is_empty() {
            return bad_request("Survey number cannot be empty");
        }
        land.survey_number = survey_number.to_string();
    }
    if let Some(area) = payload.area_hectares {
        if area < 0.0 {
            return bad_request("Land area must be non-negative");
        }
        land.area_hectares = area;
    }
    if payload.crop_type.is_some() {
        land.crop_type = payload.crop_type.clone();
    }
    if payload.irrigation_type.is_some() {
        land.irrigation_type = payload.irrigation_type.clone();
    }
    if let Some(location) = &payload.location {
        land.location = location.clone();
    }
    land.updated_at = Utc::now();

    match ctx.lands.save_async(land).await {
        Ok(land) => HttpResponse::Ok().json(json!({
            "message": "Land record updated successfully",
            "land": land,
        })),
        Err(e) => storage_failure(&e),
    }
}
