use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::responses::{DatabaseHealthResponse, HealthResponse};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "HRMS Backend Server is running!" }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        success: true,
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

pub async fn database_health(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let started = Instant::now();
    if let Err(e) = state.db_probe.ping().await {
        error!("Database probe failed: {}", e);
        return Err(AppError::Unavailable("Database connection failed".into()));
    }

    Ok(Json(DatabaseHealthResponse {
        success: true,
        database: "connected",
        backend: state.db_probe.backend(),
        latency_ms: started.elapsed().as_millis(),
    }))
}

pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
