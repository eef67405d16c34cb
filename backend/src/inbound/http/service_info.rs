//! Open informational routes: service banner and status.

use actix_web::{HttpResponse, get};
use serde::Serialize;
use utoipa::ToSchema;

/// Banner returned by `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceBanner {
    /// Human-readable greeting.
    #[schema(example = "SwissParcel backend is running")]
    pub message: &'static str,
}

/// Body returned by `GET /status`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// Always `"ok"` while the process serves requests.
    #[schema(example = "ok")]
    pub status: &'static str,
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["service"],
    security([]),
    responses((status = 200, description = "Service banner", body = ServiceBanner))
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ServiceBanner {
        message: "SwissParcel backend is running",
    })
}

/// Lightweight status check.
#[utoipa::path(
    get,
    path = "/status",
    tags = ["service"],
    security([]),
    responses((status = 200, description = "Service status", body = ServiceStatus))
)]
#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(ServiceStatus { status: "ok" })
}
