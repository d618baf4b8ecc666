//! Farmer CRUD handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_commons::{Address, Farmer, FarmerId, Role, Verification};
use agrareg_core::AppContext;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::{bad_request, not_found, require_role, require_user, storage_failure};

#[derive(Debug, Deserialize)]
pub struct CreateFarmerRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub aadhar: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFarmerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub aadhar: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// POST /api/farmers (admin|worker)
pub async fn create(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<CreateFarmerRequest>,
) -> HttpResponse {
    let user = match require_role(&req, &[Role::Admin, Role::Worker]) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let name = payload.name.trim().to_string();
    let phone = payload.phone.trim().to_string();
    if name.is_empty() || phone.is_empty() {
        return bad_request("Name and phone are required");
    }

    let now = Utc::now();
    let farmer = Farmer {
        id: FarmerId::generate(),
        name,
        phone,
        aadhar: payload.aadhar.clone(),
        address: payload.address.clone().unwrap_or_default(),
        created_by: Some(user.user_id),
        verified: Verification::default(),
        created_at: now,
        updated_at: now,
    };

    match ctx.farmers.save_async(farmer).await {
        Ok(farmer) => HttpResponse::Created().json(json!({
            "message": "Farmer created successfully",
            "farmer": farmer,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/farmers
pub async fn list(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }
    match ctx.farmers.list_recent_async().await {
        Ok(farmers) => HttpResponse::Ok().json(farmers),
        Err(e) => storage_failure(&e),
    }
}

/// GET /api/farmers/{id}
pub async fn get(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }
    match ctx.farmers.get_async(FarmerId::new(path.into_inner())).await {
        Ok(Some(farmer)) => HttpResponse::Ok().json(farmer),
        Ok(None) => not_found("Farmer not found"),
        Err(e) => storage_failure(&e),
    }
}

/// PUT /api/farmers/{id} (admin|worker)
pub async fn update(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<UpdateFarmerRequest>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin, Role::Worker]) {
        return resp;
    }

    let mut farmer = match ctx.farmers.get_async(FarmerId::new(path.into_inner())).await {
        Ok(Some(farmer)) => farmer,
        Ok(None) => return not_found("Farmer not found"),
        Err(e) => return storage_failure(&e),
    };

    if let Some(name) = &payload.name {
        let name = name.trim();
        if name.is_empty() {
            return bad_request("Name cannot be empty");
        }
        farmer.name = name.to_string();
    }
    if let Some(phone) = &payload.phone {
        let phone = phone.trim();
        if phone.is_empty() {
            return bad_request("Phone cannot be empty");
        }
        farmer.phone = phone.to_string();
    }
    if payload.aadhar.is_some() {
        farmer.aadhar = payload.aadhar.clone();
    }
    if let Some(address) = &payload.address {
        farmer.address = address.clone();
    }
    farmer.updated_at = Utc::now();

    match ctx.farmers.save_async(farmer).await {
        Ok(farmer) => HttpResponse::Ok().json(json!({
            "message": "Farmer updated successfully",
            "farmer": farmer,
        })),
        Err(e) => storage_failure(&e),
    }
}

/// PUT /api/farmers/{id}/verify (admin)
pub async fn verify(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_role(&req, &[Role::Admin]) {
        return resp;
    }

    let mut farmer = match ctx.farmers.get_async(FarmerId::new(path.into_inner())).await {
        Ok(Some(farmer)) => farmer,
        Ok(None) => return not_found("Farmer not found"),
        Err(e) => return storage_failure(&e),
    };

    let now = Utc::now();
    farmer.verified = Verification {
        status: true,
        verified_at: Some(now),
    };
    farmer.updated_at = now;

    match ctx.farmers.save_async(farmer).await {
        Ok(farmer) => HttpResponse::Ok().json(json!({
            "message": "Farmer verified successfully",
            "farmer": farmer,
        })),
        Err(e) => storage_failure(&e),
    }
}
