//! Service banner and health check.

use axum::Json;
use serde::Serialize;

use crate::config::{APP_NAME, APP_VERSION, SERVICE_NAME};

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /`: service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{APP_NAME} API"),
        version: APP_VERSION,
    })
}

/// `GET /health`: liveness check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
