//! Dashboard statistics handler.

use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_core::{compute_stats_async, AppContext};

use super::{require_user, storage_failure};

/// GET /api/dashboard/stats
pub async fn stats(req: HttpRequest, ctx: web::Data<AppContext>) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }
    match compute_stats_async(ctx.into_inner()).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => storage_failure(&e),
    }
}
